#![allow(dead_code)]

use jobly::{JoblyError, JoblyResult};
use tokio_postgres::{Client, NoTls, Transaction};

/// Connect using `DATABASE_URL`, or `None` when it isn't set.
pub async fn try_connect(test: &str) -> JoblyResult<Option<Client>> {
    let _ = dotenvy::dotenv();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping {test}");
            return Ok(None);
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .map_err(|e| JoblyError::Connection(e.to_string()))?;
    tokio::spawn(async move {
        let _ = connection.await;
    });
    Ok(Some(client))
}

/// Ids of the seeded jobs, in title order.
pub struct Seeded {
    pub job_ids: Vec<i32>,
}

/// Create temporary `companies`/`jobs` tables inside `tx` and load fixtures.
///
/// The temporary tables shadow any real ones for the rest of the transaction and
/// disappear when it ends.
pub async fn seed(tx: &Transaction<'_>) -> JoblyResult<Seeded> {
    tx.batch_execute(
        "CREATE TEMP TABLE companies (
             handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
             name TEXT UNIQUE NOT NULL,
             num_employees INTEGER CHECK (num_employees >= 0),
             description TEXT NOT NULL,
             logo_url TEXT
         ) ON COMMIT DROP;

         CREATE TEMP TABLE jobs (
             id SERIAL PRIMARY KEY,
             title TEXT NOT NULL,
             salary INTEGER CHECK (salary >= 0),
             equity NUMERIC CHECK (equity <= 1.0),
             company_handle VARCHAR(25) NOT NULL
                 REFERENCES companies ON DELETE CASCADE
         ) ON COMMIT DROP;

         INSERT INTO companies (handle, name, num_employees, description, logo_url)
         VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
                ('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
                ('c3', 'C3', 3, 'Desc3', 'http://c3.img');

         INSERT INTO jobs (title, salary, equity, company_handle)
         VALUES ('J1', 100, '0.1', 'c1'),
                ('J2', 200, '0.2', 'c1'),
                ('J3', 300, '0', 'c1'),
                ('J4', NULL, NULL, 'c1');",
    )
    .await?;

    let rows = tx.query("SELECT id FROM jobs ORDER BY title", &[]).await?;
    Ok(Seeded {
        job_ids: rows.iter().map(|row| row.get("id")).collect(),
    })
}
