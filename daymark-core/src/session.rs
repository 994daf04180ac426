//! The day-marking session.
//!
//! `DayMarker` owns the calendar list, the markings and the selected day
//! for one session. Discovery and aggregation run once at start-up; after
//! that the markings only change through `select_day` and `create_event`.

use chrono::{Local, NaiveDate};
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::calendar::{HostCalendar, first_owned};
use crate::constants::{JOKE, NO_CALENDAR_AVAILABLE, NO_DAY_SELECTED, PLACEHOLDER_TITLE};
use crate::date_key::DateKey;
use crate::error::DaymarkResult;
use crate::event::NewEvent;
use crate::host::{CalendarHost, PermissionStatus};
use crate::marking::Markings;
use crate::window::EventWindow;

/// Result of `DayMarker::initialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Ready { calendars: usize, marked_days: usize },
    /// Nothing was loaded; the markings stay empty.
    PermissionDenied(PermissionStatus),
}

/// Result of `DayMarker::create_event`.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created {
        event_id: String,
        calendar: HostCalendar,
        date: DateKey,
    },
    /// A placeholder already existed on that day (duplicate prevention on).
    AlreadyCreated {
        event_id: String,
        calendar: HostCalendar,
        date: DateKey,
    },
    NoDaySelected,
    NoCalendarAvailable,
}

impl CreateOutcome {
    /// Message to show the user for this outcome.
    pub fn notice(&self) -> &'static str {
        match self {
            CreateOutcome::Created { .. } => JOKE,
            CreateOutcome::AlreadyCreated { .. } => "That day already has a placeholder event.",
            CreateOutcome::NoDaySelected => NO_DAY_SELECTED,
            CreateOutcome::NoCalendarAvailable => NO_CALENDAR_AVAILABLE,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created { .. })
    }
}

pub struct DayMarker<H> {
    host: H,
    today: NaiveDate,
    calendars: Vec<HostCalendar>,
    markings: Markings,
    selected: Option<DateKey>,
    prevent_duplicates: bool,
}

impl<H: CalendarHost> DayMarker<H> {
    pub fn new(host: H) -> Self {
        Self::with_today(host, Local::now().date_naive())
    }

    /// Session whose event window starts on `today`.
    pub fn with_today(host: H, today: NaiveDate) -> Self {
        DayMarker {
            host,
            today,
            calendars: Vec::new(),
            markings: Markings::new(),
            selected: None,
            prevent_duplicates: false,
        }
    }

    pub fn prevent_duplicates(mut self, prevent: bool) -> Self {
        self.prevent_duplicates = prevent;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn calendars(&self) -> &[HostCalendar] {
        &self.calendars
    }

    pub fn markings(&self) -> &Markings {
        &self.markings
    }

    pub fn selected(&self) -> Option<DateKey> {
        self.selected
    }

    /// The window whose events get marked.
    pub fn window(&self) -> EventWindow {
        EventWindow::next_days(self.today)
    }

    /// Ask for calendar access, discover calendars and mark their events.
    pub async fn initialize(&mut self) -> DaymarkResult<Discovery> {
        let status = self.host.request_permission().await?;
        info!(%status, "calendar permission");

        if !status.is_granted() {
            return Ok(Discovery::PermissionDenied(status));
        }

        let calendars = self.refresh_calendars().await?.to_vec();
        self.load_events(&calendars).await?;

        Ok(Discovery::Ready {
            calendars: calendars.len(),
            marked_days: self.markings.marked_days().len(),
        })
    }

    /// Re-read the calendar list from the host.
    pub async fn refresh_calendars(&mut self) -> DaymarkResult<&[HostCalendar]> {
        self.calendars = self.host.list_calendars().await?;
        debug!(count = self.calendars.len(), "calendars listed");
        Ok(&self.calendars)
    }

    /// Fetch every calendar's events in the window and rebuild the markings.
    ///
    /// The markings are only replaced once all queries succeeded.
    pub async fn load_events(&mut self, calendars: &[HostCalendar]) -> DaymarkResult<()> {
        let window = self.window();
        let host = &self.host;

        let queries = calendars.iter().map(|calendar| async move {
            let events = host
                .list_events(std::slice::from_ref(&calendar.id), &window)
                .await?;
            debug!(calendar = %calendar.id, count = events.len(), "events listed");
            DaymarkResult::Ok(events)
        });

        let events: Vec<_> = try_join_all(queries).await?.into_iter().flatten().collect();

        self.markings = Markings::from_events(&events);
        info!(
            events = events.len(),
            marked_days = self.markings.len(),
            "markings rebuilt"
        );
        Ok(())
    }

    /// The user picked a day.
    pub fn select_day(&mut self, key: DateKey) {
        self.selected = Some(key);
        self.markings.select(key);
    }

    /// Create the placeholder event on the selected day.
    pub async fn create_event(&mut self) -> DaymarkResult<CreateOutcome> {
        let Some(date) = self.selected else {
            return Ok(CreateOutcome::NoDaySelected);
        };

        self.refresh_calendars().await?;
        let Some(calendar) = first_owned(&self.calendars).cloned() else {
            warn!("no owner calendar to create events in");
            return Ok(CreateOutcome::NoCalendarAvailable);
        };

        if self.prevent_duplicates {
            if let Some(event_id) = self.existing_placeholder(&calendar, date).await? {
                self.markings.mark_created(date);
                return Ok(CreateOutcome::AlreadyCreated {
                    event_id,
                    calendar,
                    date,
                });
            }
        }

        let event = NewEvent::placeholder(date);
        let event_id = self.host.create_event(&calendar.id, &event).await?;
        info!(%event_id, calendar = %calendar.id, %date, "placeholder created");

        self.markings.mark_created(date);

        Ok(CreateOutcome::Created {
            event_id,
            calendar,
            date,
        })
    }

    async fn existing_placeholder(
        &self,
        calendar: &HostCalendar,
        date: DateKey,
    ) -> DaymarkResult<Option<String>> {
        let events = self
            .host
            .list_events(
                std::slice::from_ref(&calendar.id),
                &EventWindow::day(date.date()),
            )
            .await?;

        Ok(events
            .into_iter()
            .find(|e| e.title == PLACEHOLDER_TITLE && e.date_key() == Some(date))
            .map(|e| e.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::AccessLevel;
    use crate::error::DaymarkError;
    use crate::event::{HostEvent, HostTime};
    use crate::marking::DayMark;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeHost {
        permission: Option<PermissionStatus>,
        calendars: Mutex<Vec<HostCalendar>>,
        events: Mutex<HashMap<String, Vec<HostEvent>>>,
        creates: Mutex<Vec<(String, NewEvent)>>,
        windows: Mutex<Vec<EventWindow>>,
        calendar_calls: AtomicUsize,
        fail_events: AtomicBool,
    }

    impl FakeHost {
        fn with_calendars(calendars: Vec<HostCalendar>) -> Self {
            FakeHost {
                permission: Some(PermissionStatus::Granted),
                calendars: Mutex::new(calendars),
                ..Default::default()
            }
        }

        fn add_event(&self, calendar_id: &str, id: &str, start: &str) {
            self.events
                .lock()
                .unwrap()
                .entry(calendar_id.to_string())
                .or_default()
                .push(HostEvent {
                    id: id.to_string(),
                    title: format!("Event {id}"),
                    start: HostTime::Text(start.to_string()),
                    end: HostTime::Text(start.to_string()),
                    calendar_id: Some(calendar_id.to_string()),
                });
        }

        fn creates(&self) -> Vec<(String, NewEvent)> {
            self.creates.lock().unwrap().clone()
        }
    }

    impl CalendarHost for FakeHost {
        async fn request_permission(&self) -> DaymarkResult<PermissionStatus> {
            Ok(self.permission.unwrap_or(PermissionStatus::Undetermined))
        }

        async fn list_calendars(&self) -> DaymarkResult<Vec<HostCalendar>> {
            self.calendar_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.calendars.lock().unwrap().clone())
        }

        async fn list_events(
            &self,
            calendar_ids: &[String],
            window: &EventWindow,
        ) -> DaymarkResult<Vec<HostEvent>> {
            if self.fail_events.load(Ordering::SeqCst) {
                return Err(DaymarkError::Provider("calendar store unavailable".into()));
            }
            self.windows.lock().unwrap().push(*window);
            let events = self.events.lock().unwrap();
            Ok(calendar_ids
                .iter()
                .flat_map(|id| events.get(id).cloned().unwrap_or_default())
                .collect())
        }

        async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> DaymarkResult<String> {
            let mut creates = self.creates.lock().unwrap();
            creates.push((calendar_id.to_string(), event.clone()));
            let id = format!("new-{}", creates.len());

            self.events
                .lock()
                .unwrap()
                .entry(calendar_id.to_string())
                .or_default()
                .push(HostEvent {
                    id: id.clone(),
                    title: event.title.clone(),
                    start: HostTime::Text(event.start.format("%Y-%m-%dT%H:%M:%S").to_string()),
                    end: HostTime::Text(event.end.format("%Y-%m-%dT%H:%M:%S").to_string()),
                    calendar_id: Some(calendar_id.to_string()),
                });
            Ok(id)
        }
    }

    fn cal(id: &str, access_level: AccessLevel) -> HostCalendar {
        HostCalendar {
            id: id.to_string(),
            name: id.to_string(),
            access_level,
        }
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn initialize_marks_events_from_every_calendar() {
        let host = FakeHost::with_calendars(vec![
            cal("c1", AccessLevel::Owner),
            cal("c2", AccessLevel::Read),
        ]);
        host.add_event("c1", "a", "2024-06-02T09:00:00Z");
        host.add_event("c1", "b", "2024-06-02T18:00:00Z");
        host.add_event("c2", "c", "2024-06-05T12:00:00");

        let mut session = DayMarker::with_today(host, june_first());
        let discovery = session.initialize().await.unwrap();

        assert_eq!(
            discovery,
            Discovery::Ready {
                calendars: 2,
                marked_days: 2
            }
        );
        assert_eq!(
            session.markings().marked_days(),
            vec![key("2024-06-02"), key("2024-06-05")]
        );
        assert_eq!(session.calendars().len(), 2);
    }

    #[tokio::test]
    async fn events_are_queried_over_thirty_days_from_midnight() {
        let host = FakeHost::with_calendars(vec![cal("c1", AccessLevel::Owner)]);
        let mut session = DayMarker::with_today(host, june_first());
        session.initialize().await.unwrap();

        let windows = session.host().windows.lock().unwrap().clone();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].from_param(), "2024-06-01T00:00:00");
        assert_eq!(windows[0].to_param(), "2024-07-01T00:00:00");
    }

    #[tokio::test]
    async fn permission_denied_loads_nothing() {
        let mut host = FakeHost::with_calendars(vec![cal("c1", AccessLevel::Owner)]);
        host.permission = Some(PermissionStatus::Denied);
        host.add_event("c1", "a", "2024-06-02T09:00:00Z");

        let mut session = DayMarker::with_today(host, june_first());
        let discovery = session.initialize().await.unwrap();

        assert_eq!(discovery, Discovery::PermissionDenied(PermissionStatus::Denied));
        assert!(session.markings().is_empty());
        assert!(session.calendars().is_empty());
        assert_eq!(session.host().calendar_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_query_keeps_previous_markings() {
        let host = FakeHost::with_calendars(vec![
            cal("c1", AccessLevel::Owner),
            cal("c2", AccessLevel::Owner),
        ]);
        host.add_event("c1", "a", "2024-06-02T09:00:00Z");

        let mut session = DayMarker::with_today(host, june_first());
        session.initialize().await.unwrap();
        let before = session.markings().clone();

        session.host().fail_events.store(true, Ordering::SeqCst);
        let calendars = session.calendars().to_vec();
        let err = session.load_events(&calendars).await.unwrap_err();

        assert!(matches!(err, DaymarkError::Provider(_)));
        assert_eq!(session.markings(), &before);
    }

    #[tokio::test]
    async fn selecting_a_marked_day_keeps_the_mark() {
        let host = FakeHost::with_calendars(vec![cal("c1", AccessLevel::Owner)]);
        host.add_event("c1", "a", "2024-06-10T09:00:00Z");

        let mut session = DayMarker::with_today(host, june_first());
        session.initialize().await.unwrap();
        session.select_day(key("2024-06-10"));

        assert_eq!(session.selected(), Some(key("2024-06-10")));
        assert_eq!(
            session.markings().get(&key("2024-06-10")),
            Some(&DayMark {
                selected: true,
                marked: Some(true)
            })
        );
    }

    #[tokio::test]
    async fn create_without_selection_is_refused() {
        let host = FakeHost::with_calendars(vec![cal("c1", AccessLevel::Owner)]);
        let mut session = DayMarker::with_today(host, june_first());
        session.initialize().await.unwrap();

        let outcome = session.create_event().await.unwrap();

        assert_eq!(outcome, CreateOutcome::NoDaySelected);
        assert_eq!(outcome.notice(), NO_DAY_SELECTED);
        assert!(session.host().creates().is_empty());
    }

    #[tokio::test]
    async fn create_without_owner_calendar_is_refused() {
        let host = FakeHost::with_calendars(vec![
            cal("holidays", AccessLevel::Read),
            cal("team", AccessLevel::Editor),
        ]);
        let mut session = DayMarker::with_today(host, june_first());
        session.initialize().await.unwrap();
        session.select_day(key("2024-06-10"));

        let outcome = session.create_event().await.unwrap();

        assert_eq!(outcome, CreateOutcome::NoCalendarAvailable);
        assert_eq!(outcome.notice(), NO_CALENDAR_AVAILABLE);
        assert!(session.host().creates().is_empty());
        assert!(!session.markings().is_marked(&key("2024-06-10")));
    }

    #[tokio::test]
    async fn select_then_create_writes_one_placeholder() {
        let host = FakeHost::with_calendars(vec![cal("c1", AccessLevel::Owner)]);
        let mut session = DayMarker::with_today(host, june_first());
        session.initialize().await.unwrap();

        session.select_day(key("2024-06-10"));
        let outcome = session.create_event().await.unwrap();

        let creates = session.host().creates();
        assert_eq!(creates.len(), 1);
        let (calendar_id, event) = &creates[0];
        assert_eq!(calendar_id, "c1");
        assert_eq!(event.start.format("%Y-%m-%dT%H:%M:%S").to_string(), "2024-06-10T10:00:00");
        assert_eq!(event.end.format("%Y-%m-%dT%H:%M:%S").to_string(), "2024-06-10T11:00:00");
        assert_eq!(event.time_zone, "UTC");

        assert!(outcome.is_created());
        assert_eq!(outcome.notice(), JOKE);
        assert_eq!(
            session.markings().get(&key("2024-06-10")),
            Some(&DayMark {
                selected: true,
                marked: Some(true)
            })
        );
    }

    #[tokio::test]
    async fn create_uses_first_owner_calendar_from_a_fresh_list() {
        let host = FakeHost::with_calendars(vec![cal("shared", AccessLevel::Read)]);
        let mut session = DayMarker::with_today(host, june_first());
        session.initialize().await.unwrap();

        // Calendars added after discovery are picked up at create time
        session
            .host()
            .calendars
            .lock()
            .unwrap()
            .extend([cal("work", AccessLevel::Owner), cal("home", AccessLevel::Owner)]);

        session.select_day(key("2024-06-12"));
        let outcome = session.create_event().await.unwrap();

        match outcome {
            CreateOutcome::Created { calendar, .. } => assert_eq!(calendar.id, "work"),
            other => panic!("expected Created, got {other:?}"),
        }
        assert_eq!(session.calendars().len(), 3);
    }

    #[tokio::test]
    async fn repeated_create_duplicates_by_default() {
        let host = FakeHost::with_calendars(vec![cal("c1", AccessLevel::Owner)]);
        let mut session = DayMarker::with_today(host, june_first());
        session.initialize().await.unwrap();

        session.select_day(key("2024-06-10"));
        session.create_event().await.unwrap();
        session.create_event().await.unwrap();

        assert_eq!(session.host().creates().len(), 2);
        assert_eq!(session.markings().len(), 1);
    }

    #[tokio::test]
    async fn prevent_duplicates_reuses_existing_placeholder() {
        let host = FakeHost::with_calendars(vec![cal("c1", AccessLevel::Owner)]);
        let mut session = DayMarker::with_today(host, june_first()).prevent_duplicates(true);
        session.initialize().await.unwrap();

        session.select_day(key("2024-06-10"));
        let first = session.create_event().await.unwrap();
        let second = session.create_event().await.unwrap();

        assert!(first.is_created());
        assert!(matches!(
            second,
            CreateOutcome::AlreadyCreated { ref event_id, .. } if event_id == "new-1"
        ));
        assert_eq!(session.host().creates().len(), 1);
    }
}
