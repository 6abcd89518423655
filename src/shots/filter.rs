use crate::data::models::Event;

/// Selection criteria for events. `team` is always required.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter<'a> {
    pub team: &'a str,
    pub player: Option<&'a str>,
    pub event_type: Option<&'a str>,
}

impl<'a> EventFilter<'a> {
    pub fn team(team: &'a str) -> Self {
        Self {
            team,
            player: None,
            event_type: None,
        }
    }

    pub fn player(mut self, player: Option<&'a str>) -> Self {
        self.player = player;
        self
    }

    pub fn event_type(mut self, event_type: &'a str) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// An event lacking a field the filter constrains never matches.
    pub fn matches(&self, event: &Event) -> bool {
        if event.team.as_deref() != Some(self.team) {
            return false;
        }
        if let Some(player) = self.player {
            if event.player.as_deref() != Some(player) {
                return false;
            }
        }
        if let Some(event_type) = self.event_type {
            if !event.is_type(event_type) {
                return false;
            }
        }
        true
    }
}

/// Borrow the events matching `filter`, preserving input order.
pub fn filter_events<'e>(events: &'e [Event], filter: &EventFilter<'_>) -> Vec<&'e Event> {
    events.iter().filter(|e| filter.matches(e)).collect()
}
