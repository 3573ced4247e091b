//! Bot commands understood by the listener and their fixed replies.

use crate::domain::SubscriberId;

/// Command recognised in an inbound text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// `/start`: subscribe to order notifications.
    Subscribe,
    /// `/status`: report the subscription state.
    Status,
    /// Anything else.
    Help,
}

impl BotCommand {
    /// Classify message text.
    ///
    /// Only the first word counts, and a `@botname` suffix is ignored so
    /// commands addressed explicitly in group chats still match.
    ///
    /// # Examples
    /// ```
    /// use order_relay::domain::BotCommand;
    ///
    /// assert_eq!(BotCommand::parse("/start"), BotCommand::Subscribe);
    /// assert_eq!(BotCommand::parse("/status@par_orders_bot"), BotCommand::Status);
    /// assert_eq!(BotCommand::parse("hello"), BotCommand::Help);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let first_word = text.split_whitespace().next().unwrap_or_default();
        let command = first_word
            .split_once('@')
            .map_or(first_word, |(command, _bot)| command);
        match command {
            "/start" => Self::Subscribe,
            "/status" => Self::Status,
            _ => Self::Help,
        }
    }
}

pub(super) const SUBSCRIBED_REPLY: &str = "✅ Вы успешно подписаны на получение заявок!\n\n\
     Теперь все заявки с сайта будут приходить сюда.";

pub(super) const ALREADY_SUBSCRIBED_REPLY: &str = "✅ Вы уже подписаны на получение заявок.\n\n\
     Все заявки с сайта будут приходить сюда.";

pub(super) const NOT_SUBSCRIBED_REPLY: &str = "❌ Вы не подписаны на получение заявок.\n\n\
     Отправьте /start для подписки.";

pub(super) const HELP_REPLY: &str = "Я бот для сбора заявок с сайта.\n\n\
     Доступные команды:\n\
     /start - подписаться на получение заявок\n\
     /status - проверить статус подписки";

pub(super) fn subscribed_status_reply(chat_id: SubscriberId) -> String {
    format!("✅ Вы подписаны на получение заявок.\n\nВаш chat_id: {chat_id}")
}
