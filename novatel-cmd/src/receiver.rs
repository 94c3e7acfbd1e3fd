use std::io::{stdout, Write};
use std::thread::sleep;
use std::time::Duration;

use anyhow::{Context, Result};
use serialport::{ClearBuffer, SerialPort, SerialPortType};
use tracing::{debug, info};

/// Length of each break condition.
const BREAK_LEN: Duration = Duration::from_millis(250);
/// Gap between the two breaks.
const BREAK_GAP: Duration = Duration::from_millis(1500);
/// Quiet time after the last break before the port is used.
const BREAK_SETTLE: Duration = Duration::from_millis(250);

/// Timeout for a single port read. The overall time allowed for a log is enforced
/// by the scanner, which retries reads that time out.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Logs that can be requested from a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogName {
    BestPosB,
    VersionB,
}

impl LogName {
    /// Name used in receiver commands.
    pub fn command_name(self) -> &'static str {
        match self {
            Self::BestPosB => "BESTPOSB",
            Self::VersionB => "VERSIONB",
        }
    }
}

impl clap::ValueEnum for LogName {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::BestPosB, Self::VersionB]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::BestPosB => Some(clap::builder::PossibleValue::new("bestposb")),
            Self::VersionB => Some(clap::builder::PossibleValue::new("versionb")),
        }
    }
}

pub fn open(path: &str, baud: u32) -> Result<Box<dyn SerialPort>> {
    serialport::new(path, baud)
        .timeout(READ_TIMEOUT)
        .open()
        .with_context(|| format!("opening serial port {path} @ {baud}"))
}

/// Send two break conditions to reset the receiver port to its command mode.
pub fn send_break(port: &mut dyn SerialPort) -> Result<()> {
    info!("sending break");
    for idx in 0..2 {
        if idx > 0 {
            sleep(BREAK_GAP);
        }
        port.set_break().context("setting break")?;
        sleep(BREAK_LEN);
        port.clear_break().context("clearing break")?;
    }
    sleep(BREAK_SETTLE);
    Ok(())
}

/// Drop any bytes received or queued for sending so replies to earlier commands
/// are not mistaken for the next one.
pub fn discard_pending(port: &mut dyn SerialPort) -> Result<()> {
    port.clear(ClearBuffer::All)
        .context("clearing serial port buffers")
}

/// Write a command requesting a single `log`, then wait `settle` for the reply to
/// start arriving.
pub fn request_log(port: &mut dyn SerialPort, log: LogName, settle: Duration) -> Result<()> {
    let cmd = format!("\r\nLOG {} ONCE\r\n", log.command_name());
    debug!("sending {cmd:?}");
    port.write_all(cmd.as_bytes())
        .with_context(|| format!("writing {} command", log.command_name()))?;
    port.flush().context("flushing command")?;
    sleep(settle);
    Ok(())
}

fn port_type(typ: &SerialPortType) -> String {
    match typ {
        SerialPortType::UsbPort(usb) => format!(
            "usb {:04x}:{:04x} {}",
            usb.vid,
            usb.pid,
            usb.product.as_deref().unwrap_or_default()
        ),
        SerialPortType::PciPort => "pci".to_string(),
        SerialPortType::BluetoothPort => "bluetooth".to_string(),
        SerialPortType::Unknown => "unknown".to_string(),
    }
}

pub fn list_ports() -> Result<()> {
    let ports = serialport::available_ports().context("listing serial ports")?;
    let mut out = stdout();
    for port in ports {
        writeln!(out, "{}\t{}", port.port_name, port_type(&port.port_type))
            .context("writing to stdout")?;
    }
    Ok(())
}
