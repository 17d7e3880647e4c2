//! # jobly
//!
//! PostgreSQL data layer for a job board of companies and the jobs they post.
//!
//! ## Features
//!
//! - **Partial updates**: [`compile_partial_update`] turns only the supplied fields
//!   into a `SET` clause with positional placeholders
//! - **Filtered listings**: [`compile_job_filters`] and [`compile_company_filters`]
//!   build `WHERE` clauses from optional criteria
//! - **Record access**: [`Company`] and [`Job`] create, list, fetch, update and delete,
//!   reporting missing records as [`JoblyError::NotFound`]
//! - **Transaction-friendly**: pass a transaction anywhere a [`GenericClient`] is expected
//! - **Parameterized only**: values never reach SQL text; identifiers are quoted
//!
//! ```ignore
//! use jobly::{Job, JobFilter, UpdateRequest};
//!
//! let filter = JobFilter::from_query_pairs([("minSalary", "150"), ("hasEquity", "true")])?;
//! let jobs = Job::find_all(&client, &filter).await?;
//!
//! let updated = Job::update(&client, jobs[0].id, &UpdateRequest::new().set("salary", 200)).await?;
//! ```

pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod partial_update;
pub mod row;
pub mod sql;
pub mod value;

#[cfg(feature = "migrate")]
pub mod migrate;
#[cfg(feature = "pool")]
pub mod pool;

pub use client::GenericClient;
pub use error::{JoblyError, JoblyResult};
pub use filter::{CompanyFilter, JobFilter, compile_company_filters, compile_job_filters};
pub use models::{
    Company, CompanyDetail, CompanyJob, Job, JobDetail, JobListing, NewCompany, NewJob,
};
pub use partial_update::{FieldMapping, UpdateRequest, compile_partial_update};
pub use row::{FromRow, RowExt};
pub use sql::{CompiledClause, Query, Sql, query, sql};
pub use value::SqlValue;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "pool")]
pub use deadpool_postgres;
pub use rust_decimal::Decimal;
pub use tokio_postgres;
