//! HUD and menu text

use crate::sim::{GamePhase, Score};

/// Score shown at the top of the screen, if any
pub fn hud_text(phase: GamePhase, score: &Score) -> Option<String> {
    match phase {
        GamePhase::Playing | GamePhase::GameOver => Some(score.current.to_string()),
        GamePhase::Menu => None,
    }
}

/// Centered overlay lines; empty while playing
pub fn overlay_lines(phase: GamePhase, score: &Score) -> Vec<String> {
    match phase {
        GamePhase::Menu => vec!["Tap to Start".to_string()],
        GamePhase::Playing => Vec::new(),
        GamePhase::GameOver => vec![
            "Game Over".to_string(),
            format!("Score: {}", score.current),
            format!("Best: {}", score.best),
            "Tap to Restart".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_overlay() {
        let score = Score::default();
        assert_eq!(overlay_lines(GamePhase::Menu, &score), vec!["Tap to Start"]);
        assert_eq!(hud_text(GamePhase::Menu, &score), None);
    }

    #[test]
    fn test_game_over_overlay() {
        let score = Score { current: 3, best: 11 };
        assert_eq!(
            overlay_lines(GamePhase::GameOver, &score),
            vec!["Game Over", "Score: 3", "Best: 11", "Tap to Restart"]
        );
        assert_eq!(hud_text(GamePhase::GameOver, &score), Some("3".to_string()));
    }

    #[test]
    fn test_playing_has_hud_only() {
        let score = Score { current: 7, best: 7 };
        assert!(overlay_lines(GamePhase::Playing, &score).is_empty());
        assert_eq!(hud_text(GamePhase::Playing, &score), Some("7".to_string()));
    }
}
