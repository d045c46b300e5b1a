// Calendar Layout
// Prints the day or week layout for an events file

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::{json, Value};

use calendar_layout::models::event::CalendarEvent;
use calendar_layout::models::ui::ViewType;
use calendar_layout::services::layout::{
    compute_day_layout, compute_week_layout, event_time_label, format_date, hour_axis_label,
    interval_geometry, week_header, DayLayout, ViewContext,
};
use calendar_layout::services::navigation::CalendarCursor;
use calendar_layout::services::settings::SettingsService;
use calendar_layout::utils::date::{parse_timezone, start_of_day};

const USAGE: &str = "usage: calendar-layout <events.json> [YYYY-MM-DD]";
const COLUMN_HEADING: &str = "%a %-d";

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting calendar layout");

    let settings_service = match std::env::var_os("CALENDAR_LAYOUT_CONFIG") {
        Some(path) => SettingsService::new(PathBuf::from(path)),
        None => SettingsService::from_default_location(),
    };
    let mut settings = settings_service.get()?;
    if let Ok(identifier) = std::env::var("CALENDAR_LAYOUT_TZ") {
        settings.timezone = parse_timezone(&identifier)?;
    }

    let mut args = std::env::args().skip(1);
    let events_path = PathBuf::from(args.next().context(USAGE)?);
    let reference = args
        .next()
        .map(|value| NaiveDate::parse_from_str(&value, "%Y-%m-%d"))
        .transpose()
        .context("Reference date must be YYYY-MM-DD")?;

    let content = std::fs::read_to_string(&events_path)
        .with_context(|| format!("Failed to read events from {}", events_path.display()))?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse events in {}", events_path.display()))?;

    let ctx = ViewContext::from_settings(&settings);
    let mut cursor = CalendarCursor::today(ctx.timezone);
    if let Some(date) = reference {
        cursor.jump_to(date);
    }
    let reference = cursor.date();

    log::info!(
        "Rendering {} view around {reference} in {}",
        settings.default_view.as_str(),
        ctx.timezone.name()
    );

    let days = match settings.default_view {
        ViewType::Day => vec![compute_day_layout(&events, reference, &ctx)?],
        ViewType::Week => compute_week_layout(&events, reference, &ctx)?,
        ViewType::Month => {
            log::warn!("Month grid is rendered by the host; printing the week instead");
            compute_week_layout(&events, reference, &ctx)?
        }
    };

    let rendered = days
        .iter()
        .map(|day| render_day(day, &ctx))
        .collect::<Result<Vec<_>>>()?;

    let output = json!({
        "timezone": ctx.timezone.name(),
        "header": week_header(&ctx),
        "hours": (0..24).map(|hour| hour_axis_label(hour, reference, ctx.timezone)).collect::<Vec<_>>(),
        "days": rendered,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn render_day(day: &DayLayout, ctx: &ViewContext) -> Result<Value> {
    let chips = day
        .enhanced_events
        .iter()
        .map(|chip| -> Result<Value> {
            let interval = chip.event.interval(ctx.timezone)?;
            let [start, end] = event_time_label(&chip.event, ctx.timezone)?;
            Ok(json!({
                "event": chip,
                "geometry": interval_geometry(&interval, day.date, ctx.timezone),
                "label": format!("{start} - {end}"),
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    let heading = format_date(
        &start_of_day(day.date, ctx.timezone),
        ctx.timezone,
        COLUMN_HEADING,
    );

    Ok(json!({
        "date": day.date,
        "heading": heading,
        "isToday": day.is_today,
        "events": chips,
    }))
}
