use super::{execute_build, execute_deploy_with, RunnerError};
use crate::cli::{BuildCommand, DeployCommand};
use apppkg_deploy::{
    DeployEnvironment, DeployError, RegistryRequest, RegistryResponse, RegistryTransport,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

struct ScriptedTransport {
    responses: Mutex<Vec<RegistryResponse>>,
    requests: Mutex<Vec<RegistryRequest>>,
}

impl ScriptedTransport {
    fn new(mut responses: Vec<RegistryResponse>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl RegistryTransport for ScriptedTransport {
    fn send(&self, request: RegistryRequest) -> Result<RegistryResponse, String> {
        self.requests.lock().expect("lock").push(request);
        self.responses
            .lock()
            .expect("lock")
            .pop()
            .ok_or_else(|| "no scripted response".to_string())
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("lock")).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn repo_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..").join(relative)
}

fn deploy_command(endpoint: Option<&str>) -> DeployCommand {
    DeployCommand {
        process_cwl_url: "https://example.org/demo/process.cwl".to_string(),
        app_pack_register_endpoint: endpoint.map(str::to_string),
        app_pack_template_file: repo_path("templates/ogcapppkg.yml"),
    }
}

fn ticket() -> DeployEnvironment {
    DeployEnvironment {
        proxy_ticket: Some("PGT-test".to_string()),
    }
}

#[test]
fn build_writes_workflow_and_reports_path() {
    let output_dir = temp_dir("build");

    let output = execute_build(&BuildCommand {
        yaml_file: repo_path("data/algorithm_config.yml"),
        workflow_output_dir: output_dir.clone(),
        cwl_template_file: repo_path("templates/process.v1_2.cwl"),
    })
    .expect("build must succeed");

    let saved = output
        .strip_prefix("CWL workflow saved to ")
        .expect("output must name the saved file");
    let written = fs::read_to_string(saved).expect("workflow must be written");
    assert!(Path::new(saved).starts_with(&output_dir));
    assert!(written.contains("cwlVersion"));
    assert!(written.contains("outputs_result"));
}

#[test]
fn build_logs_each_issue_once() {
    let sample = fs::read_to_string(repo_path("data/algorithm_config.yml")).expect("sample config");
    let config = sample
        .lines()
        .filter(|line| !line.starts_with("license:"))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n  - name: preview\n    type: File\n";
    let config_dir = temp_dir("logged-config");
    fs::create_dir_all(&config_dir).expect("must create config dir");
    let config_path = config_dir.join("algorithm_config.yml");
    fs::write(&config_path, config).expect("must write config");

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let report = tracing::subscriber::with_default(subscriber, || {
        execute_build(&BuildCommand {
            yaml_file: config_path.clone(),
            workflow_output_dir: temp_dir("logged-out"),
            cwl_template_file: repo_path("templates/process.v1_2.cwl"),
        })
    });

    assert!(report.is_ok());
    let text = logs.text();
    assert_eq!(text.matches("config.expected_key_missing").count(), 1);
    assert_eq!(text.matches("config.outputs.shared_binding").count(), 1);
}

#[test]
fn build_with_missing_config_fails() {
    let error = execute_build(&BuildCommand {
        yaml_file: temp_dir("missing").join("absent.yml"),
        workflow_output_dir: temp_dir("missing-out"),
        cwl_template_file: repo_path("templates/process.v1_2.cwl"),
    })
    .expect_err("must fail");
    assert!(matches!(error, RunnerError::Build(_)));
}

#[test]
fn deploy_without_endpoint_fails_before_sending() {
    let transport = ScriptedTransport::new(Vec::new());

    let error = execute_deploy_with(&deploy_command(None), &ticket(), &transport)
        .expect_err("must fail");

    assert!(matches!(error, RunnerError::MissingRegistryEndpoint));
    assert!(transport.requests.lock().expect("lock").is_empty());
}

#[test]
fn deploy_reports_created_process() {
    let transport = ScriptedTransport::new(vec![RegistryResponse {
        status: 201,
        body: "{}".to_string(),
    }]);

    let output = execute_deploy_with(
        &deploy_command(Some("https://registry.example/processes")),
        &ticket(),
        &transport,
    )
    .expect("deploy must succeed");

    assert_eq!(
        output,
        "process registered from https://example.org/demo/process.cwl"
    );
}

#[test]
fn deploy_reports_updated_process_after_conflict() {
    let transport = ScriptedTransport::new(vec![
        RegistryResponse {
            status: 409,
            body: r#"{"additionalProperties":{"processID":"p123"}}"#.to_string(),
        },
        RegistryResponse {
            status: 200,
            body: "{}".to_string(),
        },
    ]);

    let output = execute_deploy_with(
        &deploy_command(Some("https://registry.example/processes")),
        &ticket(),
        &transport,
    )
    .expect("deploy must succeed");

    assert!(output.starts_with("process `p123` updated"));
    let requests = transport.requests.lock().expect("lock");
    assert_eq!(requests[1].url, "https://registry.example/processes/p123");
}

#[test]
fn deploy_failure_status_is_an_error() {
    let transport = ScriptedTransport::new(vec![RegistryResponse {
        status: 400,
        body: "bad request".to_string(),
    }]);

    let error = execute_deploy_with(
        &deploy_command(Some("https://registry.example/processes")),
        &ticket(),
        &transport,
    )
    .expect_err("must fail");

    assert!(matches!(
        error,
        RunnerError::Deploy(DeployError::HttpStatus { status: 400, .. })
    ));
}

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "apppkg-runner-{prefix}-{}-{nanos}",
        std::process::id()
    ))
}
