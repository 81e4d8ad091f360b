mod broadcast_notifier;

pub use broadcast_notifier::BroadcastOrderNotifier;
