// Benchmark for week layout
// Measures grouping and bucketing over growing event lists

use calendar_layout::models::event::CalendarEvent;
use calendar_layout::models::settings::WeekStart;
use calendar_layout::services::layout::{compute_week_layout, ViewContext};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_events(count: usize) -> Vec<CalendarEvent> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    (0..count)
        .map(|i| {
            // Spread over the week on a half-hour grid, with repeated slots
            let start = base + Duration::minutes(((i * 97) % (7 * 48)) as i64 * 30);
            let end = start + Duration::minutes(30 + (i % 4) as i64 * 30);
            CalendarEvent::new(
                i as i64,
                format!("Event {i}"),
                start.to_rfc3339(),
                end.to_rfc3339(),
            )
        })
        .collect()
}

fn bench_week_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("week_layout");
    let reference = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let ctx = ViewContext::new(Tz::UTC, WeekStart::Monday).with_today(reference);

    for count in [10, 100, 1000].iter() {
        let events = generate_events(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| compute_week_layout(black_box(events), black_box(reference), &ctx));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_week_layout);
criterion_main!(benches);
