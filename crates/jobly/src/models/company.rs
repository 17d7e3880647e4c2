//! Record access for `companies`.

use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::filter::{CompanyFilter, compile_company_filters};
use crate::partial_update::{FieldMapping, UpdateRequest, compile_partial_update};
use crate::row::{FromRow, RowExt};
use crate::sql::{Query, query};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// A job as listed under its company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl FromRow for CompanyJob {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
        })
    }
}

/// A company with its jobs, ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

/// Input for [`Company::create`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

pub(crate) async fn fetch_company(
    conn: &impl GenericClient,
    handle: &str,
) -> JoblyResult<Company> {
    query(format!(
        "SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1"
    ))
    .tag("companies.get")
    .bind(handle.to_string())
    .fetch_opt_as(conn)
    .await?
    .ok_or_else(|| JoblyError::not_found(format!("No company: {handle}")))
}

impl Company {
    pub const UPDATABLE: &'static [&'static str] =
        &["name", "description", "numEmployees", "logoUrl"];

    pub fn field_mapping() -> FieldMapping {
        FieldMapping::new()
            .map("numEmployees", "num_employees")
            .map("logoUrl", "logo_url")
    }

    pub fn list_query(filter: &CompanyFilter) -> JoblyResult<Query> {
        filter.validate()?;
        let clause = compile_company_filters(filter);
        let sql = if clause.is_empty() {
            format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name")
        } else {
            format!(
                "SELECT {COMPANY_COLUMNS} FROM companies {} ORDER BY name",
                clause.text
            )
        };
        Ok(query(sql).tag("companies.find_all").bind_clause(clause))
    }

    pub fn update_query(handle: &str, request: &UpdateRequest) -> JoblyResult<Query> {
        request.ensure_only(Self::UPDATABLE)?;
        let clause = compile_partial_update(request, &Self::field_mapping())?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_COLUMNS}",
            clause.text,
            clause.next_placeholder()
        );
        Ok(query(sql)
            .tag("companies.update")
            .bind_clause(clause)
            .bind(handle.to_string()))
    }

    /// Insert a company. An existing handle is a [`JoblyError::Validation`].
    pub async fn create(conn: &impl GenericClient, company: &NewCompany) -> JoblyResult<Company> {
        let existing = query("SELECT handle FROM companies WHERE handle = $1")
            .tag("companies.duplicate_check")
            .bind(company.handle.clone())
            .fetch_opt(conn)
            .await?;
        if existing.is_some() {
            return Err(JoblyError::validation(format!(
                "Duplicate company: {}",
                company.handle
            )));
        }

        query(format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLUMNS}"
        ))
        .tag("companies.create")
        .bind(company.handle.clone())
        .bind(company.name.clone())
        .bind(company.description.clone())
        .bind(company.num_employees)
        .bind(company.logo_url.clone())
        .fetch_one_as(conn)
        .await
    }

    /// List companies matching `filter`, ordered by name.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> JoblyResult<Vec<Company>> {
        Self::list_query(filter)?.fetch_all_as(conn).await
    }

    /// Fetch a company and its jobs.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<CompanyDetail> {
        let company = fetch_company(conn, handle).await?;
        let jobs = query(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .tag("companies.jobs")
        .bind(handle.to_string())
        .fetch_all_as(conn)
        .await?;
        Ok(CompanyDetail { company, jobs })
    }

    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        request: &UpdateRequest,
    ) -> JoblyResult<Company> {
        Self::update_query(handle, request)?
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No company: {handle}")))
    }

    /// Delete a company (and, by cascade, its jobs), returning its handle.
    pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<String> {
        let deleted: Option<String> =
            query("DELETE FROM companies WHERE handle = $1 RETURNING handle")
                .tag("companies.remove")
                .bind(handle.to_string())
                .fetch_opt(conn)
                .await?
                .map(|row| row.try_get_column("handle"))
                .transpose()?;
        deleted.ok_or_else(|| JoblyError::not_found(format!("No company: {handle}")))
    }
}
