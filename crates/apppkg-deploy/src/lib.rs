mod request;
mod submit;
mod transport;

pub use request::{inject_execution_unit_href, load_deployment_request};
pub use submit::{
    deploy_app_pack, submit_process, DeployEnvironment, DeployError, DeployRequest, SubmitOutcome,
    PROXY_TICKET_HEADER, PROXY_TICKET_VAR,
};
pub use transport::{
    HttpMethod, RegistryRequest, RegistryResponse, RegistryTransport, ReqwestRegistryTransport,
};
