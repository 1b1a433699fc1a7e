//! Ports - interfaces between the application layer and the outside world

pub mod command_runner;
pub mod deploy_events;
pub mod prompter;

pub use command_runner::{CommandRunner, RemoteHost, Target};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink, Stage};
pub use prompter::Prompter;
