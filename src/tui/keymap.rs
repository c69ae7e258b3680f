use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything a key can ask for while navigating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddTask,
    NewTab,
    RemoveTab,
    DeleteTask,
    ToggleTask,
    PrevTab,
    NextTab,
    CursorUp,
    CursorDown,
    ToggleTheme,
    ToggleCompact,
    Help,
    Dismiss,
    Quit,
}

/// One row of the key binding table
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub keys: &'static str,
    pub label: &'static str,
    pub command: Command,
    /// Shown in the status row hint line
    pub hint: bool,
}

/// Key bindings in help order
pub const BINDINGS: &[Binding] = &[
    Binding { keys: "a", label: "Add task", command: Command::AddTask, hint: true },
    Binding { keys: "space", label: "Toggle done", command: Command::ToggleTask, hint: true },
    Binding { keys: "q", label: "Delete task", command: Command::DeleteTask, hint: true },
    Binding { keys: "t", label: "New tab", command: Command::NewTab, hint: true },
    Binding { keys: "r", label: "Remove tab", command: Command::RemoveTab, hint: true },
    Binding { keys: "h/\u{2190}", label: "Previous tab", command: Command::PrevTab, hint: false },
    Binding { keys: "l/\u{2192}", label: "Next tab", command: Command::NextTab, hint: false },
    Binding { keys: "k/\u{2191}", label: "Cursor up", command: Command::CursorUp, hint: false },
    Binding { keys: "j/\u{2193}", label: "Cursor down", command: Command::CursorDown, hint: false },
    Binding { keys: "d", label: "Theme", command: Command::ToggleTheme, hint: true },
    Binding { keys: "c", label: "Compact", command: Command::ToggleCompact, hint: true },
    Binding { keys: "?", label: "Help", command: Command::Help, hint: true },
    Binding { keys: "esc", label: "Dismiss", command: Command::Dismiss, hint: false },
    Binding { keys: "ctrl+q", label: "Quit", command: Command::Quit, hint: true },
];

/// Map a key press in navigate mode to its command
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('a') => Command::AddTask,
        KeyCode::Char('t') => Command::NewTab,
        KeyCode::Char('r') => Command::RemoveTab,
        KeyCode::Char('q') => Command::DeleteTask,
        KeyCode::Char(' ') => Command::ToggleTask,
        KeyCode::Char('h') | KeyCode::Left => Command::PrevTab,
        KeyCode::Char('l') | KeyCode::Right => Command::NextTab,
        KeyCode::Char('k') | KeyCode::Up => Command::CursorUp,
        KeyCode::Char('j') | KeyCode::Down => Command::CursorDown,
        KeyCode::Char('d') => Command::ToggleTheme,
        KeyCode::Char('c') => Command::ToggleCompact,
        KeyCode::Char('?') => Command::Help,
        KeyCode::Esc => Command::Dismiss,
        _ => return None,
    };
    Some(command)
}
