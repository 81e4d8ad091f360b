/// Logging port for use cases. Messages name the user and the line or product
/// they concern; transport detail stays in the adapters.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
