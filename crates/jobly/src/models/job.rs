//! Record access for `jobs`.

use super::company::{Company, fetch_company};
use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::filter::{JobFilter, compile_job_filters};
use crate::partial_update::{FieldMapping, UpdateRequest, compile_partial_update};
use crate::row::{FromRow, RowExt};
use crate::sql::{Query, query};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

const LIST_BASE: &str = "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, \
     c.name AS company_name \
     FROM jobs j LEFT JOIN companies AS c ON c.handle = j.company_handle";

/// A job row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// A job as shown in listings, with the owning company's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

impl FromRow for JobListing {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
            company_name: row.try_get_column("company_name")?,
        })
    }
}

/// A single job with its owning company resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

/// Input for [`Job::create`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl Job {
    /// Fields a partial update may touch.
    pub const UPDATABLE: &'static [&'static str] = &["title", "salary", "equity"];

    /// Job fields are stored under their own names.
    pub fn field_mapping() -> FieldMapping {
        FieldMapping::new()
    }

    /// Listing statement: base join, compiled criteria, `ORDER BY title`.
    pub fn list_query(filter: &JobFilter) -> Query {
        let clause = compile_job_filters(filter);
        let sql = if clause.is_empty() {
            format!("{LIST_BASE} ORDER BY title")
        } else {
            format!("{LIST_BASE} {} ORDER BY title", clause.text)
        };
        query(sql).tag("jobs.find_all").bind_clause(clause)
    }

    /// Update statement: the compiled `SET` clause, then the id as the last placeholder.
    pub fn update_query(id: i32, request: &UpdateRequest) -> JoblyResult<Query> {
        request.ensure_only(Self::UPDATABLE)?;
        let clause = compile_partial_update(request, &Self::field_mapping())?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            clause.text,
            clause.next_placeholder()
        );
        Ok(query(sql).tag("jobs.update").bind_clause(clause).bind(id))
    }

    /// Insert a job and return it.
    pub async fn create(conn: &impl GenericClient, job: &NewJob) -> JoblyResult<Job> {
        query(format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
        ))
        .tag("jobs.create")
        .bind(job.title.clone())
        .bind(job.salary)
        .bind(job.equity)
        .bind(job.company_handle.clone())
        .fetch_one_as(conn)
        .await
    }

    /// List jobs matching `filter`, ordered by title. No match is an empty list.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: &JobFilter,
    ) -> JoblyResult<Vec<JobListing>> {
        Self::list_query(filter).fetch_all_as(conn).await
    }

    /// Fetch a job and its company.
    ///
    /// Fails with [`JoblyError::NotFound`] before the company lookup runs when
    /// the id doesn't exist.
    pub async fn get(conn: &impl GenericClient, id: i32) -> JoblyResult<JobDetail> {
        let job: Job = query(format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .tag("jobs.get")
            .bind(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No job: {id}")))?;

        let company = fetch_company(conn, &job.company_handle).await?;

        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    /// Apply a partial update and return the updated job.
    pub async fn update(
        conn: &impl GenericClient,
        id: i32,
        request: &UpdateRequest,
    ) -> JoblyResult<Job> {
        Self::update_query(id, request)?
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No job: {id}")))
    }

    /// Delete a job, returning its id.
    pub async fn remove(conn: &impl GenericClient, id: i32) -> JoblyResult<i32> {
        let deleted: Option<i32> = query("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .tag("jobs.remove")
            .bind(id)
            .fetch_opt(conn)
            .await?
            .map(|row| row.try_get_column("id"))
            .transpose()?;
        deleted.ok_or_else(|| JoblyError::not_found(format!("No job: {id}")))
    }
}
