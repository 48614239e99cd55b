//! 失效总线
//!
//! 写操作成功后发布主题，读视图在 Effect 中订阅自己渲染的主题，
//! 主题版本变化即重新查询。刷新契约由此显式可见。

use classroom_shared::protocol::Topic;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct InvalidationBus {
    versions: RwSignal<[u64; Topic::ALL.len()]>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self {
            versions: RwSignal::new([0; Topic::ALL.len()]),
        }
    }

    /// 发布：递增相关主题的版本
    pub fn publish(&self, topics: &[Topic]) {
        if topics.is_empty() {
            return;
        }
        tracing::debug!(?topics, "invalidating");
        self.versions.update(|v| {
            for topic in topics {
                v[topic.index()] += 1;
            }
        });
    }

    /// 写操作结束：成功时发布主题，失败时不发布；原样返回结果
    pub fn publish_if_ok<T, E>(&self, topics: &[Topic], result: Result<T, E>) -> Result<T, E> {
        if result.is_ok() {
            self.publish(topics);
        }
        result
    }

    /// 订阅：在当前响应式作用域中追踪主题版本
    pub fn track(&self, topic: Topic) -> u64 {
        self.versions.with(|v| v[topic.index()])
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(bus: &InvalidationBus) -> Vec<u64> {
        Topic::ALL.iter().map(|&t| bus.track(t)).collect()
    }

    #[test]
    fn publish_bumps_only_named_topics() {
        let owner = Owner::new();
        owner.with(|| {
            let bus = InvalidationBus::new();
            bus.publish(&[Topic::Groups]);

            assert_eq!(bus.track(Topic::Groups), 1);
            for topic in Topic::ALL.iter().filter(|&&t| t != Topic::Groups) {
                assert_eq!(bus.track(*topic), 0, "{:?} should be untouched", topic);
            }

            bus.publish(&[Topic::Groups, Topic::Students]);
            assert_eq!(bus.track(Topic::Groups), 2);
            assert_eq!(bus.track(Topic::Students), 1);
        });
    }

    #[test]
    fn empty_publish_is_a_no_op() {
        let owner = Owner::new();
        owner.with(|| {
            let bus = InvalidationBus::new();
            bus.publish(&[]);
            assert!(versions(&bus).iter().all(|&v| v == 0));
        });
    }

    #[test]
    fn failed_mutation_publishes_nothing() {
        let owner = Owner::new();
        owner.with(|| {
            let bus = InvalidationBus::new();

            let result = bus.publish_if_ok(&[Topic::Activities], Err::<(), _>("Forbidden"));
            assert_eq!(result, Err("Forbidden"));
            assert!(versions(&bus).iter().all(|&v| v == 0));

            let result = bus.publish_if_ok(&[Topic::Activities], Ok::<_, &str>(3));
            assert_eq!(result, Ok(3));
            assert_eq!(bus.track(Topic::Activities), 1);
        });
    }
}
