use std::time::Duration;

use chrono::NaiveTime;

use crate::assistant::gateway::Gateway;
use crate::models::{ChatMessage, Sender};

pub const AI_GREETING: &str = "আসসালামু আলাইকুম! আমি আপনার ইসলামি সহকারী। রমজান বা ইসলাম বিষয়ে আপনার যেকোনো প্রশ্ন করতে পারেন।";
pub const ADMIN_GREETING: &str =
    "সরাসরি এডমিন সাপোর্ট। অ্যাপ সংক্রান্ত কোনো সমস্যা বা পরামর্শ থাকলে এখানে লিখুন।";
pub const ADMIN_RECEIPT: &str = "জাযাকাল্লাহ! আপনার বার্তাটি আমাদের সার্ভারে জমা হয়েছে। শীঘ্রই আমাদের একজন প্রতিনিধি আপনার সাথে যোগাযোগ করবেন ইনশাআল্লাহ।";

const ADMIN_RECEIPT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    Ai,
    Admin,
}

/// The two conversation threads. Each starts with its greeting.
pub struct ChatSession {
    mode: ChatMode,
    ai: Vec<ChatMessage>,
    admin: Vec<ChatMessage>,
    receipt_delay: Duration,
}

impl ChatSession {
    pub fn new(mode: ChatMode, now: NaiveTime) -> Self {
        Self {
            mode,
            ai: vec![ChatMessage::new(AI_GREETING, Sender::Assistant, now)],
            admin: vec![ChatMessage::new(ADMIN_GREETING, Sender::Admin, now)],
            receipt_delay: ADMIN_RECEIPT_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_receipt_delay(mut self, delay: Duration) -> Self {
        self.receipt_delay = delay;
        self
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ChatMode) {
        self.mode = mode;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        match self.mode {
            ChatMode::Ai => &self.ai,
            ChatMode::Admin => &self.admin,
        }
    }

    /// Post `input` to the current thread and return the reply. Blank
    /// input is ignored.
    pub fn send(&mut self, input: &str, gateway: &Gateway, now: NaiveTime) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        match self.mode {
            ChatMode::Ai => {
                self.ai.push(ChatMessage::new(text, Sender::User, now));
                let answer = gateway.ask(text);
                self.ai.push(ChatMessage::new(answer, Sender::Assistant, now));
                self.ai.last()
            }
            ChatMode::Admin => {
                self.admin.push(ChatMessage::new(text, Sender::User, now));
                std::thread::sleep(self.receipt_delay);
                let received = now
                    + chrono::Duration::from_std(self.receipt_delay).unwrap_or_else(|_| chrono::Duration::zero());
                self.admin.push(ChatMessage::new(ADMIN_RECEIPT, Sender::Admin, received));
                log::debug!("Admin message recorded locally");
                self.admin.last()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::gateway::tests::{instant_retry, ScriptedBackend};
    use crate::assistant::gateway::MISSING_KEY_ANSWER;
    use crate::config::settings::AssistantConfig;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 5, 0).unwrap()
    }

    fn offline() -> Gateway {
        Gateway::with_backend(None, instant_retry(), &AssistantConfig::default())
    }

    #[test]
    fn threads_start_with_greetings() {
        let mut session = ChatSession::new(ChatMode::Ai, noon());
        assert_eq!(session.messages()[0].text, AI_GREETING);
        assert_eq!(session.messages()[0].time, "12:05");
        session.set_mode(ChatMode::Admin);
        assert_eq!(session.messages()[0].text, ADMIN_GREETING);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut session = ChatSession::new(ChatMode::Ai, noon());
        assert!(session.send("   ", &offline(), noon()).is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn ai_thread_gets_gateway_answer() {
        let backend = ScriptedBackend::new(vec![Ok("তাকওয়া অর্জনের জন্য।".to_string())]);
        let gateway = Gateway::with_backend(Some(Box::new(backend)), instant_retry(), &AssistantConfig::default());
        let mut session = ChatSession::new(ChatMode::Ai, noon());

        let reply = session.send("রোজা কেন?", &gateway, noon()).cloned().unwrap();
        assert_eq!(reply.sender, Sender::Assistant);
        assert_eq!(reply.text, "তাকওয়া অর্জনের জন্য।");
        assert_eq!(session.messages()[1].sender, Sender::User);
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn ai_thread_without_key_explains() {
        let mut session = ChatSession::new(ChatMode::Ai, noon());
        let reply = session.send("প্রশ্ন", &offline(), noon()).unwrap();
        assert_eq!(reply.text, MISSING_KEY_ANSWER);
    }

    #[test]
    fn admin_thread_sends_receipt() {
        let mut session = ChatSession::new(ChatMode::Admin, noon()).with_receipt_delay(Duration::ZERO);
        let reply = session.send(" অ্যাপ খুলছে না ", &offline(), noon()).cloned().unwrap();
        assert_eq!(reply.text, ADMIN_RECEIPT);
        assert_eq!(reply.sender, Sender::Admin);
        assert_eq!(session.messages()[1].text, "অ্যাপ খুলছে না");

        // The AI thread is untouched.
        session.set_mode(ChatMode::Ai);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn receipt_is_stamped_after_the_delay() {
        let sent = NaiveTime::from_hms_milli_opt(12, 5, 59, 995).unwrap();
        let mut session =
            ChatSession::new(ChatMode::Admin, sent).with_receipt_delay(Duration::from_millis(10));
        session.send("সাহায্য দরকার", &offline(), sent);

        let thread = session.messages();
        assert_eq!(thread[1].time, "12:05");
        assert_eq!(thread[2].sender, Sender::Admin);
        assert_eq!(thread[2].time, "12:06");
    }
}
