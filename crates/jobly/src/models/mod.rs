//! Record access for the `companies` and `jobs` tables.
//!
//! Every operation takes any [`GenericClient`](crate::GenericClient), so the same
//! code runs on a pooled connection or inside a caller's transaction.

pub mod company;
pub mod job;

pub use company::{Company, CompanyDetail, CompanyJob, NewCompany};
pub use job::{Job, JobDetail, JobListing, NewJob};
