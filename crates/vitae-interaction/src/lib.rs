pub mod http_profile_gateway;
pub mod tailor_service;

pub use http_profile_gateway::HttpProfileGateway;
pub use tailor_service::HttpTailoringService;
