//! Variable registry: names, kinds, slots and integer limits.
//!
//! Slot numbers are part of the binary contract with the device and must never be
//! renumbered. Integer and string variables live in separate slot spaces.

/// Value kind of a configuration variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Integer,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDescriptor {
    pub name: &'static str,
    pub kind: VarKind,
    pub slot: u8,
}

/// Inclusive range restriction on an integer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntLimit {
    pub slot: u8,
    pub min: i32,
    pub max: i32,
}

impl IntLimit {
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Largest string payload a SETS record can carry.
pub const MAX_STRING_LENGTH: usize = u16::MAX as usize;

const MIN_OBSERVATION_INTERVAL: i32 = 60;
const MAX_OBSERVATION_INTERVAL: i32 = 8 * 60 * 60;
const MAX_UPLOAD_INTERVAL: i32 = 48 * 60 * 60;
const MIN_INET_PORT: i32 = 1000;
const MAX_INET_PORT: i32 = 65535;

const fn int(name: &'static str, slot: u8) -> VariableDescriptor {
    VariableDescriptor {
        name,
        kind: VarKind::Integer,
        slot,
    }
}

const fn string(name: &'static str, slot: u8) -> VariableDescriptor {
    VariableDescriptor {
        name,
        kind: VarKind::String,
        slot,
    }
}

const SNAPPYSENSE_VARIABLES: &[VariableDescriptor] = &[
    int("enabled", 0),
    int("observation-interval", 1),
    int("upload-interval", 2),
    int("mqtt-endpoint-port", 3),
    int("mqtt-use-tls", 4),
    string("device-id", 0),
    string("device-class", 1),
    string("ssid1", 2),
    string("ssid2", 3),
    string("ssid3", 4),
    string("password1", 5),
    string("password2", 6),
    string("password3", 7),
    string("mqtt-endpoint-host", 8),
    string("mqtt-id", 9),
    string("mqtt-root-cert", 10),
    string("mqtt-auth", 11),
    string("mqtt-device-cert", 12),
    string("mqtt-private-key", 13),
    string("mqtt-username", 14),
    string("mqtt-password", 15),
];

const SNAPPYSENSE_LIMITS: &[IntLimit] = &[
    IntLimit { slot: 0, min: 0, max: 1 },
    IntLimit {
        slot: 1,
        min: MIN_OBSERVATION_INTERVAL,
        max: MAX_OBSERVATION_INTERVAL,
    },
    IntLimit {
        slot: 2,
        min: MIN_OBSERVATION_INTERVAL,
        max: MAX_UPLOAD_INTERVAL,
    },
    IntLimit {
        slot: 3,
        min: MIN_INET_PORT,
        max: MAX_INET_PORT,
    },
];

/// Read-only lookup tables shared by the parser, code generator and listing.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    variables: &'static [VariableDescriptor],
    limits: &'static [IntLimit],
}

/// The variable set understood by SnappySense firmware.
pub static SNAPPYSENSE: Registry = Registry {
    variables: SNAPPYSENSE_VARIABLES,
    limits: SNAPPYSENSE_LIMITS,
};

impl Registry {
    pub fn lookup(&self, name: &str) -> Option<VariableDescriptor> {
        self.variables.iter().find(|v| v.name == name).copied()
    }

    /// Limit for an integer slot; `None` means the full `i32` range is accepted.
    pub fn limit_for(&self, slot: u8) -> Option<IntLimit> {
        self.limits.iter().find(|l| l.slot == slot).copied()
    }

    /// Reverse lookup, for listings.
    pub fn name_of(&self, kind: VarKind, slot: u8) -> Option<&'static str> {
        self.variables
            .iter()
            .find(|v| v.kind == kind && v.slot == slot)
            .map(|v| v.name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        SNAPPYSENSE
    }
}
