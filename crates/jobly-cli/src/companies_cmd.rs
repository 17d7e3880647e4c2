use crate::cli::RecordCommand;
use crate::context::Context;
use crate::print_json;
use anyhow::Context as _;
use jobly::{Company, CompanyFilter, NewCompany, UpdateRequest};
use serde_json::json;

pub async fn run(ctx: &Context, cmd: RecordCommand<String>) -> anyhow::Result<()> {
    let client = ctx.client().await?;

    let out = match cmd {
        RecordCommand::List { filters } => {
            let filter = CompanyFilter::from_query_pairs(
                filters.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            )?;
            let companies = Company::find_all(&client, &filter).await?;
            json!({ "companies": companies })
        }
        RecordCommand::Get(handle) => {
            let company = Company::get(&client, &handle).await?;
            json!({ "company": company })
        }
        RecordCommand::Create { json } => {
            let new_company: NewCompany =
                serde_json::from_str(&json).context("invalid company JSON")?;
            let company = Company::create(&client, &new_company).await?;
            json!({ "company": company })
        }
        RecordCommand::Update { key, json } => {
            let request: UpdateRequest =
                serde_json::from_str(&json).context("invalid update JSON")?;
            let company = Company::update(&client, &key, &request).await?;
            json!({ "company": company })
        }
        RecordCommand::Delete(handle) => {
            let deleted = Company::remove(&client, &handle).await?;
            json!({ "deleted": deleted })
        }
    };

    print_json(&out)
}
