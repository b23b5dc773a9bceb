use crate::game::Direction;

/// What the driver should do in response to one line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Advance exactly one tick
    Next,
    /// Switch between step mode and auto mode
    ToggleMode,
    Pause,
    Slower,
    Faster,
    Restart,
    /// Print the current snapshot without ticking
    Show,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_line(&self, line: &str) -> Command {
        let word = line.trim().to_ascii_lowercase();

        match word.as_str() {
            // Movement - names
            "up" => Command::Turn(Direction::Up),
            "down" => Command::Turn(Direction::Down),
            "left" => Command::Turn(Direction::Left),
            "right" => Command::Turn(Direction::Right),

            // Movement - WASD
            "w" => Command::Turn(Direction::Up),
            "s" => Command::Turn(Direction::Down),
            "a" => Command::Turn(Direction::Left),
            "d" => Command::Turn(Direction::Right),

            // Pacing
            "n" | "next" | "" => Command::Next,
            "m" | "mode" => Command::ToggleMode,
            "p" | "pause" => Command::Pause,
            "[" => Command::Slower,
            "]" => Command::Faster,

            // Controls
            "show" => Command::Show,
            "r" | "restart" => Command::Restart,
            "q" | "quit" | "exit" => Command::Quit,

            _ => Command::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_names() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_line("up"), Command::Turn(Direction::Up));
        assert_eq!(handler.handle_line("DOWN"), Command::Turn(Direction::Down));
        assert_eq!(handler.handle_line("Left\n"), Command::Turn(Direction::Left));
        assert_eq!(handler.handle_line("  right "), Command::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_line("w"), Command::Turn(Direction::Up));
        assert_eq!(handler.handle_line("a"), Command::Turn(Direction::Left));
        assert_eq!(handler.handle_line("S"), Command::Turn(Direction::Down));
        assert_eq!(handler.handle_line("d"), Command::Turn(Direction::Right));
    }

    #[test]
    fn test_pacing_commands() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_line("n"), Command::Next);
        assert_eq!(handler.handle_line(""), Command::Next);
        assert_eq!(handler.handle_line("m"), Command::ToggleMode);
        assert_eq!(handler.handle_line("pause"), Command::Pause);
        assert_eq!(handler.handle_line("["), Command::Slower);
        assert_eq!(handler.handle_line("]"), Command::Faster);
    }

    #[test]
    fn test_quit_and_restart() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_line("q"), Command::Quit);
        assert_eq!(handler.handle_line("EXIT"), Command::Quit);
        assert_eq!(handler.handle_line("r"), Command::Restart);
        assert_eq!(handler.handle_line("show"), Command::Show);
    }

    #[test]
    fn test_unknown_input() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_line("x"), Command::None);
        assert_eq!(handler.handle_line("north"), Command::None);
    }
}
