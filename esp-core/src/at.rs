//! AT-Kommando-Protokoll für das LoRa-Modul
//!
//! Jede Prüfung hat dieselbe Form: Kommando mit CR-LF senden, eine Zeile
//! mit Timeout lesen, Marker in der Antwort suchen.

use core::fmt;

use heapless::{String, Vec};

use crate::traits::{SerialError, SerialTransport};

pub const CMD_AT: &str = "AT\r\n";
pub const CMD_VERSION: &str = "AT+VER\r\n";
pub const CMD_DEV_EUI: &str = "AT+ID=DevEui\r\n";

/// Wartezeit auf eine Antwortzeile (pro Versuch)
pub const AT_RESPONSE_TIMEOUT_MS: u64 = 500;

/// Anzahl `AT`-Versuche bei der Verbindungsprüfung
pub const CONNECT_ATTEMPTS: u8 = 5;

/// Maximale Länge einer Antwortzeile ohne Terminator
pub const LINE_CAPACITY: usize = 127;

/// Maximale Länge der formatierten DevEui (16 Oktette)
pub const DEV_EUI_CAPACITY: usize = 32;

/// Fehler-Typ für AT-Kommandos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtError {
    /// Keine (vollständige) Zeile innerhalb des Timeouts
    ReadTimeout,
    /// Zeile empfangen, aber erwarteter Marker fehlt
    UnexpectedResponse,
    /// Kein `OK` nach allen Versuchen
    NotResponding { attempts: u8 },
    /// DevEui-Zeile ohne gültige Hex-Gruppen
    MalformedIdentifier,
    /// UART-Fehler beim Senden oder Empfangen
    Serial(SerialError),
}

impl From<SerialError> for AtError {
    fn from(err: SerialError) -> Self {
        match err {
            SerialError::Timeout => AtError::ReadTimeout,
            other => AtError::Serial(other),
        }
    }
}

/// Eine Antwortzeile ohne CR/LF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLine {
    text: String<LINE_CAPACITY>,
}

impl ResponseLine {
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.as_str().contains(marker)
    }
}

impl fmt::Display for ResponseLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DevEui als zusammenhängender Hex-String
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEui {
    hex: String<DEV_EUI_CAPACITY>,
}

impl DeviceEui {
    /// Formatiert eine Antwort wie `+ID: DevEui, AB:CD:EF:01:23:45:67:89`
    ///
    /// Nimmt den Text nach dem ersten `", "`, trennt an `:` und hängt die
    /// Gruppen ohne Trennzeichen aneinander. Jede Gruppe muss genau zwei
    /// Hex-Ziffern haben.
    ///
    /// ```
    /// # use esp_core::DeviceEui;
    /// let eui = DeviceEui::parse("+ID: DevEui, AB:CD:EF:01:23:45:67:89").unwrap();
    /// assert_eq!(eui.as_str(), "ABCDEF0123456789");
    /// ```
    pub fn parse(line: &str) -> Result<Self, AtError> {
        let (_, groups) = line
            .split_once(", ")
            .ok_or(AtError::MalformedIdentifier)?;
        let groups = groups.trim_end();
        if groups.is_empty() {
            return Err(AtError::MalformedIdentifier);
        }

        let mut hex = String::new();
        for group in groups.split(':') {
            if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(AtError::MalformedIdentifier);
            }
            hex.push_str(group)
                .map_err(|_| AtError::MalformedIdentifier)?;
        }
        Ok(Self { hex })
    }

    pub fn as_str(&self) -> &str {
        self.hex.as_str()
    }
}

impl fmt::Display for DeviceEui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AT-Client über einer seriellen Verbindung
pub struct AtClient<T> {
    transport: T,
}

impl<T: SerialTransport> AtClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    pub async fn send_command(&mut self, command: &str) -> Result<(), AtError> {
        self.transport
            .write_all(command.as_bytes())
            .await
            .map_err(AtError::from)
    }

    /// Liest eine Zeile bis LF (exklusive)
    ///
    /// CR-Bytes werden überall verworfen. Jedes Byte wartet höchstens
    /// `timeout_ms`. Ein Timeout nach bereits empfangenen Bytes verwirft die
    /// Teilzeile und liefert ebenfalls `AtError::ReadTimeout`.
    ///
    /// Mehr als `LINE_CAPACITY` Bytes werden bis zum LF gelesen und verworfen,
    /// damit der Rest der Zeile nicht als nächste Antwort erscheint.
    pub async fn read_line(&mut self, timeout_ms: u64) -> Result<ResponseLine, AtError> {
        let mut bytes: Vec<u8, LINE_CAPACITY> = Vec::new();

        loop {
            let byte = match self.transport.read_byte(timeout_ms).await {
                Ok(byte) => byte,
                // Volle Zeile ohne Terminator: Inhalt ist vollständig
                Err(SerialError::Timeout) if bytes.is_full() => break,
                Err(err) => return Err(err.into()),
            };
            match byte {
                b'\n' => break,
                b'\r' => continue,
                other => {
                    // Überlauf wird verworfen
                    let _ = bytes.push(other);
                }
            }
        }

        let text = String::from_utf8(bytes).map_err(|_| AtError::UnexpectedResponse)?;
        Ok(ResponseLine { text })
    }

    /// Kommando senden, eine Zeile lesen, Marker prüfen
    async fn query(&mut self, command: &str, marker: &str) -> Result<ResponseLine, AtError> {
        self.send_command(command).await?;
        let line = self.read_line(AT_RESPONSE_TIMEOUT_MS).await?;
        if line.contains(marker) {
            Ok(line)
        } else {
            Err(AtError::UnexpectedResponse)
        }
    }

    /// Sendet `AT` bis zu `CONNECT_ATTEMPTS` mal
    ///
    /// Liefert die Nummer (1-basiert) des ersten Versuchs mit `OK`.
    pub async fn check_connection(&mut self) -> Result<u8, AtError> {
        for attempt in 1..=CONNECT_ATTEMPTS {
            if self.query(CMD_AT, "OK").await.is_ok() {
                return Ok(attempt);
            }
        }
        Err(AtError::NotResponding {
            attempts: CONNECT_ATTEMPTS,
        })
    }

    /// Sendet `AT+VER`, die Antwort muss `VER` enthalten
    pub async fn check_version(&mut self) -> Result<ResponseLine, AtError> {
        self.query(CMD_VERSION, "VER").await
    }

    /// Sendet `AT+ID=DevEui`, die Antwort muss `DevEui` enthalten
    ///
    /// Erfolg hängt nur am Marker. Die formatierte DevEui ist `None`, wenn
    /// die Hex-Gruppen der Zeile nicht lesbar sind.
    pub async fn check_device_eui(
        &mut self,
    ) -> Result<(ResponseLine, Option<DeviceEui>), AtError> {
        let line = self.query(CMD_DEV_EUI, "DevEui").await?;
        let eui = DeviceEui::parse(line.as_str()).ok();
        Ok((line, eui))
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for AtError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            AtError::ReadTimeout => defmt::write!(fmt, "Read timeout"),
            AtError::UnexpectedResponse => defmt::write!(fmt, "Unexpected response"),
            AtError::NotResponding { attempts } => {
                defmt::write!(fmt, "No OK after {} attempts", attempts)
            }
            AtError::MalformedIdentifier => defmt::write!(fmt, "Malformed DevEui"),
            AtError::Serial(e) => defmt::write!(fmt, "Serial: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ResponseLine {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceEui {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.as_str())
    }
}
