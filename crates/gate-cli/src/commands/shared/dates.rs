use anyhow::Context;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// From local midnight of `from` up to, but excluding, local midnight after
/// `to`, as inclusive UTC instants.
pub fn day_bounds(from: NaiveDate, to: NaiveDate) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    day_bounds_in(&Local, from, to)
}

fn day_bounds_in<Tz: TimeZone>(
    tz: &Tz,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    let after = to
        .succ_opt()
        .with_context(|| format!("{to} is the last representable date"))?;
    let start = local_midnight(tz, from)?;
    let end = local_midnight(tz, after)? - Duration::nanoseconds(1);
    Ok((start, end))
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> anyhow::Result<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|midnight| midnight.with_timezone(&Utc))
        .with_context(|| format!("{date} has no local midnight"))
}
