mod duplicate_parcel_policy;
mod join_configuration;

pub use duplicate_parcel_policy::DuplicateParcelPolicy;
pub use join_configuration::JoinConfiguration;
