//! Game listener that writes every event to the log.

use log::info;

use crate::game::game_event::GameEvent;
use crate::game::game_model::GameListener;

/// Formats events as `"{KIND} {detail}"` under the `match` log target.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventLogger;

impl EventLogger {
    pub fn format(event: &GameEvent) -> String {
        format!("{} {}", event.kind, event.detail)
    }

    pub fn listener(self) -> GameListener {
        Box::new(move |event: &GameEvent| {
            info!(target: "match", "{}", Self::format(event));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_event::GameEventKind;

    #[test]
    fn format_keeps_trailing_space_for_empty_detail() {
        let event = GameEvent::new(GameEventKind::Draw, "");
        assert_eq!(EventLogger::format(&event), "DRAW ");
        let event = GameEvent::new(GameEventKind::Win, "BLK");
        assert_eq!(EventLogger::format(&event), "WIN BLK");
    }
}
