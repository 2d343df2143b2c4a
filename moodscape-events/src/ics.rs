use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use ics::{
    escape_text,
    properties::{Categories, Description, DtEnd, DtStart, Location, Summary},
};
use once_cell::sync::Lazy;
use url::Url;

use crate::{Error, Event, Result};

static GOOGLE_CALENDAR: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://calendar.google.com/calendar/render").expect("static url is valid")
});

const ICS_TIMESTAMP: &str = "%Y%m%dT%H%M%S";

impl Event {
    /// Events have no end time of their own and are assumed to last this long.
    pub const DURATION_HOURS: i64 = 2;

    /// Combines `date` and `time` into a floating local timestamp.
    pub fn starts_at(&self) -> Result<NaiveDateTime> {
        let invalid = || Error::InvalidSchedule {
            id: self.id.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        };

        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| invalid())?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").map_err(|_| invalid())?;

        Ok(date.and_time(time))
    }

    pub fn ends_at(&self) -> Result<NaiveDateTime> {
        Ok(self.starts_at()? + Duration::hours(Self::DURATION_HOURS))
    }

    pub fn to_ics(&self) -> Result<ics::Event<'_>> {
        let start = self.starts_at()?.format(ICS_TIMESTAMP).to_string();
        let end = self.ends_at()?.format(ICS_TIMESTAMP).to_string();

        let id = format!("{}_{}@moodscape", start, self.id);

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(escape_text(self.title.as_str())));
        ics_event.push(Description::new(escape_text(self.description.as_str())));
        ics_event.push(Location::new(escape_text(self.location())));
        ics_event.push(Categories::new(self.category.as_str()));

        Ok(ics_event)
    }

    /// A Google Calendar "add event" link prefilled with this event.
    pub fn google_calendar_url(&self) -> Result<String> {
        let start = self.starts_at()?.format(ICS_TIMESTAMP);
        let end = self.ends_at()?.format(ICS_TIMESTAMP);

        let mut url = GOOGLE_CALENDAR.clone();
        url.query_pairs_mut()
            .append_pair("action", "TEMPLATE")
            .append_pair("text", &self.title)
            .append_pair("details", &self.description)
            .append_pair("location", &self.location())
            .append_pair("dates", &format!("{start}/{end}"));

        Ok(url.into())
    }

    fn location(&self) -> String {
        format!("{}, {}", self.venue, self.address)
    }
}

/// Builds a calendar from `events`, failing on the first event whose schedule does not parse.
pub fn to_calendar<'a>(name: &'a str, events: &[&'a Event]) -> Result<ics::ICalendar<'a>> {
    let mut icalendar = ics::ICalendar::new("2.0", name);

    for event in events {
        icalendar.add_event(event.to_ics()?);
    }

    Ok(icalendar)
}
