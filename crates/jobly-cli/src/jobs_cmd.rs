use crate::cli::RecordCommand;
use crate::context::Context;
use crate::print_json;
use anyhow::Context as _;
use jobly::{Job, JobFilter, NewJob, UpdateRequest};
use serde_json::json;

pub async fn run(ctx: &Context, cmd: RecordCommand<i32>) -> anyhow::Result<()> {
    let client = ctx.client().await?;

    let out = match cmd {
        RecordCommand::List { filters } => {
            let filter =
                JobFilter::from_query_pairs(filters.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
            let jobs = Job::find_all(&client, &filter).await?;
            json!({ "jobs": jobs })
        }
        RecordCommand::Get(id) => {
            let job = Job::get(&client, id).await?;
            json!({ "job": job })
        }
        RecordCommand::Create { json } => {
            let new_job: NewJob = serde_json::from_str(&json).context("invalid job JSON")?;
            let job = Job::create(&client, &new_job).await?;
            json!({ "job": job })
        }
        RecordCommand::Update { key, json } => {
            let request: UpdateRequest =
                serde_json::from_str(&json).context("invalid update JSON")?;
            let job = Job::update(&client, key, &request).await?;
            json!({ "job": job })
        }
        RecordCommand::Delete(id) => {
            let deleted = Job::remove(&client, id).await?;
            json!({ "deleted": deleted })
        }
    };

    print_json(&out)
}
