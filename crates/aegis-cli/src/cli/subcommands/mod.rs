mod guidance;
mod org;

pub use guidance::GuidanceCommands;
pub use org::OrgCommands;
