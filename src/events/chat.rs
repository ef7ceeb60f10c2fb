use std::fmt;

/// Тип команды IRC, который несёт сообщение зрителя
pub const PRIVMSG: &str = "PRIVMSG";

/// Событие от чат-клиента. Подключение и разбор протокола живут снаружи,
/// сюда приходит уже разобранное сообщение.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub sender_is_broadcaster: bool,
    pub command_type: String,
    pub text: String,
}

impl ChatEvent {
    pub fn new(sender_is_broadcaster: bool, command_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_is_broadcaster,
            command_type: command_type.into(),
            text: text.into(),
        }
    }

    pub fn privmsg(sender_is_broadcaster: bool, text: impl Into<String>) -> Self {
        Self::new(sender_is_broadcaster, PRIVMSG, text)
    }

    pub fn is_privmsg(&self) -> bool {
        self.command_type == PRIVMSG
    }
}

impl fmt::Display for ChatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sender = if self.sender_is_broadcaster { "broadcaster" } else { "viewer" };
        write!(f, "{} [{}]: {}", self.command_type, sender, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privmsg_constructor() {
        let event = ChatEvent::privmsg(true, "UP");
        assert!(event.is_privmsg());
        assert!(event.sender_is_broadcaster);
        assert_eq!(event.text, "UP");

        let other = ChatEvent::new(true, "USERSTATE", "");
        assert!(!other.is_privmsg());
    }
}
