use std::panic;

/// Routes panic messages through tracing so they end up next to the rest of the logs.
pub fn set_hook() {
    panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<unknown>");

        match info.location() {
            Some(location) => error!(
                file = location.file(),
                line = location.line(),
                "panicked: {}",
                payload
            ),
            None => error!("panicked: {}", payload),
        }
    }));
}
