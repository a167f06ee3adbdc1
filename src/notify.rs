use crate::error::NotifyError;

pub trait Notifier {
    fn notify(&mut self, email: &str, display_name: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, email: &str, display_name: &str) -> Result<(), NotifyError> {
        log::info!("[NOTIFY] congratulations sent to:{} player:{}", email, display_name);
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, email: &str, display_name: &str) -> Result<(), NotifyError> {
        (**self).notify(email, display_name)
    }
}
