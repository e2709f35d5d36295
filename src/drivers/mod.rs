pub mod light_output;
pub mod receiver;
pub mod serial_console;

pub use light_output::LightOutputs;
pub use receiver::RcReceiver;
pub use serial_console::SerialConsole;
