//! Performance benchmarks for the dashboard core.
//!
//! This suite covers the hot paths of the dashboard:
//! - Rendering a busy month grid
//! - Bucketing a month of events day by day
//! - Grouping deals into the pipeline
//! - Serving a month grid through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Weekday};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use bizdash::aggregate::group_by_stage;
use bizdash::api::{AppState, create_router};
use bizdash::calendar::{CalendarState, GridOptions, MonthEvents, YearMonth, bucketize, render};
use bizdash::config::CalendarConfig;
use bizdash::models::{
    Deal, DealStage, LeaveSpan, LeaveStatus, LeaveType, TaskPriority, TaskStatus, WorkItem,
};
use bizdash::source::{InMemorySource, Row, Table};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn march_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// Creates `per_day` work items for every day of March 2024 and one
/// week-long leave span per ten items.
fn create_month_events(per_day: usize) -> MonthEvents {
    let work_items: Vec<WorkItem> = (0..31 * per_day)
        .map(|i| WorkItem {
            id: Uuid::from_u128(i as u128),
            title: format!("Task {}", i),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: Some(march_first() + Duration::days((i % 31) as i64)),
        })
        .collect();

    let leave_spans: Vec<LeaveSpan> = (0..work_items.len() / 10)
        .map(|i| {
            let start_date = march_first() + Duration::days((i % 28) as i64);
            LeaveSpan {
                id: Uuid::from_u128(1_000_000 + i as u128),
                employee_id: Uuid::from_u128(i as u128),
                start_date,
                end_date: start_date + Duration::days(6),
                leave_type: LeaveType::Annual,
                status: LeaveStatus::Approved,
            }
        })
        .collect();

    MonthEvents::new(work_items, leave_spans)
}

fn create_loaded_state(per_day: usize) -> CalendarState {
    let state = CalendarState::new(YearMonth::new(2024, 3).unwrap(), Weekday::Sun);
    state
        .apply(state.ticket(), create_month_events(per_day))
        .unwrap()
}

fn create_deals(count: usize) -> Vec<Deal> {
    (0..count)
        .map(|i| Deal {
            id: Uuid::from_u128(i as u128),
            title: format!("Deal {}", i),
            value: Decimal::new((i as i64 + 1) * 12_500, 2),
            stage: DealStage::ALL[i % DealStage::ALL.len()],
            company_id: None,
            contact_id: None,
            expected_close_date: None,
            created_at: None,
        })
        .collect()
}

/// Benchmark: Grid rendering at increasing event density.
fn bench_render_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_grid");

    for per_day in [1usize, 10, 50] {
        let state = create_loaded_state(per_day);
        let options = GridOptions::default();

        group.throughput(Throughput::Elements((31 * per_day) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(per_day), &state, |b, state| {
            b.iter(|| black_box(render(state, &options)))
        });
    }

    group.finish();
}

/// Benchmark: Bucketing every day of a month.
fn bench_bucketize_month(c: &mut Criterion) {
    let events = create_month_events(10);

    c.bench_function("bucketize_month", |b| {
        b.iter(|| {
            let total: usize = (0..31)
                .map(|d| bucketize(&events, march_first() + Duration::days(d)).len())
                .sum();
            black_box(total)
        })
    });
}

/// Benchmark: Pipeline grouping.
fn bench_group_by_stage(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by_stage");

    for count in [100usize, 1000] {
        let deals = create_deals(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &deals, |b, deals| {
            b.iter(|| black_box(group_by_stage(deals.clone())))
        });
    }

    group.finish();
}

/// Benchmark: Month grid served end to end from the in-memory backend.
fn bench_calendar_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let source = InMemorySource::new();
    let rows: Vec<Row> = (0..310)
        .map(|i| {
            let due = march_first() + Duration::days(i % 31);
            let title = format!("Task {}", i);
            json!({"id": Uuid::from_u128(i as u128), "title": title, "due_date": due})
                .as_object()
                .unwrap()
                .clone()
        })
        .collect();
    rt.block_on(source.seed(Table::Tasks, rows));

    let router = create_router(AppState::new(Arc::new(source), CalendarConfig::default()));

    c.bench_function("calendar_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/calendar/2024/3")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_render_grid,
    bench_bucketize_month,
    bench_group_by_stage,
    bench_calendar_endpoint,
);

criterion_main!(benches);
