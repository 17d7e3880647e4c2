mod common;

use jobly::{Decimal, Job, JobFilter, JoblyResult, NewJob, SqlValue, UpdateRequest};

fn titles(jobs: &[jobly::JobListing]) -> Vec<&str> {
    jobs.iter().map(|j| j.title.as_str()).collect()
}

#[tokio::test]
async fn find_all_filters_and_orders_by_title() -> JoblyResult<()> {
    let Some(mut client) = common::try_connect("find_all_filters_and_orders_by_title").await?
    else {
        return Ok(());
    };
    let tx = client.transaction().await?;
    common::seed(&tx).await?;

    let all = Job::find_all(&tx, &JobFilter::default()).await?;
    assert_eq!(titles(&all), vec!["J1", "J2", "J3", "J4"]);
    assert_eq!(all[0].company_name.as_deref(), Some("C1"));
    assert_eq!(all[0].equity, Some(Decimal::new(1, 1)));

    let by_salary = Job::find_all(
        &tx,
        &JobFilter {
            min_salary: Some(250),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(titles(&by_salary), vec!["J3"]);

    let with_equity = Job::find_all(
        &tx,
        &JobFilter {
            has_equity: Some(true),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(titles(&with_equity), vec!["J1", "J2"]);

    let combined = Job::find_all(
        &tx,
        &JobFilter {
            min_salary: Some(150),
            has_equity: Some(true),
            title: Some("j".into()),
        },
    )
    .await?;
    assert_eq!(titles(&combined), vec!["J2"]);

    let none = Job::find_all(
        &tx,
        &JobFilter {
            title: Some("nope".into()),
            ..Default::default()
        },
    )
    .await?;
    assert!(none.is_empty());

    Ok(())
}

#[tokio::test]
async fn get_resolves_the_company() -> JoblyResult<()> {
    let Some(mut client) = common::try_connect("get_resolves_the_company").await? else {
        return Ok(());
    };
    let tx = client.transaction().await?;
    let seeded = common::seed(&tx).await?;

    let job = Job::get(&tx, seeded.job_ids[0]).await?;
    assert_eq!(job.title, "J1");
    assert_eq!(job.salary, Some(100));
    assert_eq!(job.company.handle, "c1");
    assert_eq!(job.company.num_employees, Some(1));

    let err = Job::get(&tx, 0).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: No job: 0");

    Ok(())
}

#[tokio::test]
async fn create_and_remove() -> JoblyResult<()> {
    let Some(mut client) = common::try_connect("create_and_remove").await? else {
        return Ok(());
    };
    let tx = client.transaction().await?;
    common::seed(&tx).await?;

    let new_job = NewJob {
        title: "Test".into(),
        salary: Some(100),
        equity: Some(Decimal::new(1, 1)),
        company_handle: "c1".into(),
    };
    let job = Job::create(&tx, &new_job).await?;
    assert_eq!(job.title, "Test");
    assert_eq!(job.equity, Some(Decimal::new(1, 1)));

    assert_eq!(Job::remove(&tx, job.id).await?, job.id);
    assert!(Job::get(&tx, job.id).await.unwrap_err().is_not_found());
    assert!(Job::remove(&tx, job.id).await.unwrap_err().is_not_found());

    Ok(())
}

#[tokio::test]
async fn create_for_unknown_company_is_a_foreign_key_violation() -> JoblyResult<()> {
    let Some(mut client) =
        common::try_connect("create_for_unknown_company_is_a_foreign_key_violation").await?
    else {
        return Ok(());
    };
    let tx = client.transaction().await?;
    common::seed(&tx).await?;

    let new_job = NewJob {
        title: "Orphan".into(),
        salary: None,
        equity: None,
        company_handle: "nope".into(),
    };
    let err = Job::create(&tx, &new_job).await.unwrap_err();
    assert!(matches!(err, jobly::JoblyError::ForeignKeyViolation(_)));

    Ok(())
}

#[tokio::test]
async fn update_changes_only_supplied_fields() -> JoblyResult<()> {
    let Some(mut client) = common::try_connect("update_changes_only_supplied_fields").await?
    else {
        return Ok(());
    };
    let tx = client.transaction().await?;
    let seeded = common::seed(&tx).await?;
    let id = seeded.job_ids[0];

    let request = UpdateRequest::new()
        .set("title", "New")
        .set("equity", "0.5");
    let job = Job::update(&tx, id, &request).await?;
    assert_eq!(job.title, "New");
    assert_eq!(job.salary, Some(100));
    assert_eq!(job.equity, Some(Decimal::new(5, 1)));
    assert_eq!(job.company_handle, "c1");

    let cleared = Job::update(&tx, id, &UpdateRequest::new().set("salary", SqlValue::Null)).await?;
    assert_eq!(cleared.salary, None);
    assert_eq!(cleared.title, "New");

    Ok(())
}

#[tokio::test]
async fn update_errors() -> JoblyResult<()> {
    let Some(mut client) = common::try_connect("update_errors").await? else {
        return Ok(());
    };
    let tx = client.transaction().await?;
    let seeded = common::seed(&tx).await?;

    let missing = Job::update(&tx, 0, &UpdateRequest::new().set("title", "x"))
        .await
        .unwrap_err();
    assert!(missing.is_not_found());

    let empty = Job::update(&tx, seeded.job_ids[0], &UpdateRequest::new())
        .await
        .unwrap_err();
    assert!(empty.is_validation());

    let negative = Job::update(&tx, seeded.job_ids[0], &UpdateRequest::new().set("salary", -1))
        .await
        .unwrap_err();
    assert!(matches!(negative, jobly::JoblyError::CheckViolation(_)));

    Ok(())
}
