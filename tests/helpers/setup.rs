use churnverse_infra::{ChurnverseContext, ISys, InMemoryMessageSender};
use std::sync::Arc;

pub struct StaticTimeSys;
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        1717236000000 // Sat Jun 01 2024 10:00:00 GMT+0000
    }
}

pub struct TestApp {
    pub ctx: ChurnverseContext,
    pub sender: Arc<InMemoryMessageSender>,
}

// Inmemory context with a frozen clock and a sender that keeps the messages
pub fn spawn_app() -> TestApp {
    let mut ctx = ChurnverseContext::create_inmemory();
    let sender = Arc::new(InMemoryMessageSender::new());
    ctx.sender = sender.clone();
    ctx.sys = Arc::new(StaticTimeSys {});
    TestApp { ctx, sender }
}
