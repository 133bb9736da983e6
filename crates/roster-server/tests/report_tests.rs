//! Reporting queries over seeded hiring data

use roster_common::types::REPORT_YEAR;
use roster_server::features::reports::queries::{departments_above_average, hires_by_quarter};
use sqlx::PgPool;

async fn seed(pool: &PgPool) {
    sqlx::query("INSERT INTO departments (id, name) VALUES (1, 'Sales'), (2, 'Engineering'), (3, 'Legal')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO jobs (id, title) VALUES (1, 'Recruiter'), (2, 'Developer')")
        .execute(pool)
        .await
        .unwrap();
    // Engineering: 4 hires, Sales: 2, Legal: 1, unmatched department 99: 1.
    // One 2020 hire that every report must ignore.
    sqlx::query(
        r#"
        INSERT INTO hired_employees (id, name, hired_at, department_id, job_id) VALUES
            (1, 'A', '2021-01-10 08:00:00', 2, 2),
            (2, 'B', '2021-04-10 08:00:00', 2, 2),
            (3, 'C', '2021-04-20 08:00:00', 2, 2),
            (4, 'D', '2021-12-31 23:00:00', 2, 1),
            (5, 'E', '2021-07-01 00:00:00', 1, 1),
            (6, 'F', '2021-08-15 12:00:00', 1, NULL),
            (7, 'G', '2021-02-02 10:00:00', 3, 1),
            (8, 'H', '2021-10-05 10:00:00', 99, 1),
            (9, 'I', '2020-12-31 23:59:59', 2, 2),
            (10, 'J', NULL, 2, 2)
        "#,
    )
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_hires_by_quarter_splits_by_month(pool: PgPool) {
    seed(&pool).await;

    let rows = hires_by_quarter::handle(pool, REPORT_YEAR).await.unwrap();

    let engineering_dev = rows
        .iter()
        .find(|r| r.department == "Engineering" && r.job == "Developer")
        .unwrap();
    assert_eq!(
        (engineering_dev.q1, engineering_dev.q2, engineering_dev.q3, engineering_dev.q4),
        (1, 2, 0, 0)
    );

    let sales_unknown = rows
        .iter()
        .find(|r| r.department == "Sales" && r.job == "Unknown")
        .unwrap();
    assert_eq!(sales_unknown.q3, 1);

    assert!(rows
        .iter()
        .any(|r| r.department == "Unknown" && r.job == "Recruiter" && r.q4 == 1));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_hires_by_quarter_totals_match_year(pool: PgPool) {
    seed(&pool).await;

    let rows = hires_by_quarter::handle(pool.clone(), REPORT_YEAR).await.unwrap();

    let total: i64 = rows.iter().map(|r| r.total()).sum();
    let expected: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM hired_employees WHERE EXTRACT(YEAR FROM hired_at) = $1",
    )
    .bind(REPORT_YEAR)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(total, expected);
    assert_eq!(total, 8);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_hires_by_quarter_is_sorted(pool: PgPool) {
    seed(&pool).await;

    let rows = hires_by_quarter::handle(pool, REPORT_YEAR).await.unwrap();

    let keys: Vec<(String, String)> = rows
        .iter()
        .map(|r| (r.department.clone(), r.job.clone()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_departments_above_average(pool: PgPool) {
    seed(&pool).await;

    // Counts 4, 2, 1, 1: mean is 2, so only Engineering qualifies.
    let rows = departments_above_average::handle(pool, REPORT_YEAR).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 2);
    assert_eq!(rows[0].department, "Engineering");
    assert_eq!(rows[0].hired, 4);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_departments_without_hires_do_not_lower_the_mean(pool: PgPool) {
    sqlx::query(
        "INSERT INTO departments (id, name) VALUES (1, 'Sales'), (2, 'Legal'), (3, 'Support'), (4, 'Training')",
    )
    .execute(&pool)
    .await
    .unwrap();
    // Sales 4, Legal 2, Support 1 in 2021; Training only hired in 2020.
    sqlx::query(
        r#"
        INSERT INTO hired_employees (id, name, hired_at, department_id, job_id) VALUES
            (1, 'A', '2021-01-10 08:00:00', 1, 1),
            (2, 'B', '2021-02-10 08:00:00', 1, 1),
            (3, 'C', '2021-03-10 08:00:00', 1, 1),
            (4, 'D', '2021-04-10 08:00:00', 1, 1),
            (5, 'E', '2021-05-10 08:00:00', 2, 1),
            (6, 'F', '2021-06-10 08:00:00', 2, 1),
            (7, 'G', '2021-07-10 08:00:00', 3, 1),
            (8, 'H', '2020-07-10 08:00:00', 4, 1)
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    // Mean over departments hiring in 2021 is 7 / 3; counting Training would make it 7 / 4.
    let rows = departments_above_average::handle(pool, REPORT_YEAR).await.unwrap();

    let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_hires_by_quarter_keeps_named_unknown_apart(pool: PgPool) {
    sqlx::query("INSERT INTO departments (id, name) VALUES (1, 'Unknown')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO jobs (id, title) VALUES (1, 'Recruiter')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        r#"
        INSERT INTO hired_employees (id, name, hired_at, department_id, job_id) VALUES
            (1, 'A', '2021-01-10 08:00:00', 1, 1),
            (2, 'B', '2021-02-10 08:00:00', 99, 1)
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let rows = hires_by_quarter::handle(pool, REPORT_YEAR).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|r| r.department == "Unknown" && r.job == "Recruiter" && r.q1 == 1));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_departments_above_average_reports_unknown(pool: PgPool) {
    sqlx::query("INSERT INTO departments (id, name) VALUES (7, 'Services')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        r#"
        INSERT INTO hired_employees (id, name, hired_at, department_id, job_id) VALUES
            (1, 'A', '2021-01-10 08:00:00', 42, 1),
            (2, 'B', '2021-02-10 08:00:00', 42, 1),
            (3, 'C', '2021-03-10 08:00:00', 42, 1),
            (4, 'D', '2021-04-10 08:00:00', 7, 1)
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let rows = departments_above_average::handle(pool, REPORT_YEAR).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 0);
    assert_eq!(rows[0].department, "Unknown");
    assert_eq!(rows[0].hired, 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_reports_empty_without_data(pool: PgPool) {
    let quarters = hires_by_quarter::handle(pool.clone(), REPORT_YEAR).await.unwrap();
    let departments = departments_above_average::handle(pool, REPORT_YEAR).await.unwrap();

    assert!(quarters.is_empty());
    assert!(departments.is_empty());
}
