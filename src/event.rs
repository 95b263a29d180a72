//! Event identifiers.
//!
//! An event is an opaque condition identifier reported by a monitor for
//! the current control cycle. It carries no behavior of its own; its
//! meaning comes entirely from its row in a [`PolicyTable`](crate::PolicyTable).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! event_names {
    ($( $variant:ident => $wire:literal ),* $(,)?) => {
        /// Every condition identifier a monitor can report.
        ///
        /// Wire names are the camelCase names used in published records.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventName {
            $( $variant, )*
        }

        impl EventName {
            /// All event names in declaration order.
            pub const ALL: &'static [EventName] = &[ $( EventName::$variant, )* ];

            /// Stable wire name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )*
                }
            }
        }
    };
}

event_names! {
    StockFcw => "stockFcw",
    JoystickDebug => "joystickDebug",
    ControlsInitializing => "controlsInitializing",
    Startup => "startup",
    StartupMaster => "startupMaster",
    StartupNoControl => "startupNoControl",
    StartupNoCar => "startupNoCar",
    StartupNoFw => "startupNoFw",
    DashcamMode => "dashcamMode",
    InvalidLkasSetting => "invalidLkasSetting",
    CruiseMismatch => "cruiseMismatch",
    CarUnrecognized => "carUnrecognized",
    StockAeb => "stockAeb",
    Fcw => "fcw",
    Ldw => "ldw",
    VehicleModelInvalid => "vehicleModelInvalid",
    SteerTempUnavailableSilent => "steerTempUnavailableSilent",
    PreDriverDistracted => "preDriverDistracted",
    PromptDriverDistracted => "promptDriverDistracted",
    DriverDistracted => "driverDistracted",
    PreDriverUnresponsive => "preDriverUnresponsive",
    PromptDriverUnresponsive => "promptDriverUnresponsive",
    DriverUnresponsive => "driverUnresponsive",
    ManualRestart => "manualRestart",
    ResumeRequired => "resumeRequired",
    BelowSteerSpeed => "belowSteerSpeed",
    PreLaneChangeLeft => "preLaneChangeLeft",
    PreLaneChangeRight => "preLaneChangeRight",
    LaneChangeBlocked => "laneChangeBlocked",
    LaneChange => "laneChange",
    SteerSaturated => "steerSaturated",
    FanMalfunction => "fanMalfunction",
    CameraMalfunction => "cameraMalfunction",
    GpsMalfunction => "gpsMalfunction",
    LocalizerMalfunction => "localizerMalfunction",
    PcmEnable => "pcmEnable",
    ButtonEnable => "buttonEnable",
    PcmDisable => "pcmDisable",
    ButtonCancel => "buttonCancel",
    BrakeHold => "brakeHold",
    ParkBrake => "parkBrake",
    PedalPressed => "pedalPressed",
    PedalPressedPreEnable => "pedalPressedPreEnable",
    GasPressedOverride => "gasPressedOverride",
    WrongCarMode => "wrongCarMode",
    WrongCruiseMode => "wrongCruiseMode",
    SteerTempUnavailable => "steerTempUnavailable",
    OutOfSpace => "outOfSpace",
    BelowEngageSpeed => "belowEngageSpeed",
    SensorDataInvalid => "sensorDataInvalid",
    NoGps => "noGps",
    SoundsUnavailable => "soundsUnavailable",
    TooDistracted => "tooDistracted",
    Overheat => "overheat",
    WrongGear => "wrongGear",
    CalibrationInvalid => "calibrationInvalid",
    CalibrationIncomplete => "calibrationIncomplete",
    DoorOpen => "doorOpen",
    SeatbeltNotLatched => "seatbeltNotLatched",
    EspDisabled => "espDisabled",
    LowBattery => "lowBattery",
    CommIssue => "commIssue",
    ProcessNotRunning => "processNotRunning",
    RadarFault => "radarFault",
    ModeldLagging => "modeldLagging",
    PosenetInvalid => "posenetInvalid",
    DeviceFalling => "deviceFalling",
    LowMemory => "lowMemory",
    HighCpuUsage => "highCpuUsage",
    AccFaulted => "accFaulted",
    ControlsMismatch => "controlsMismatch",
    RoadCameraError => "roadCameraError",
    DriverCameraError => "driverCameraError",
    WideRoadCameraError => "wideRoadCameraError",
    UsbError => "usbError",
    CanError => "canError",
    SteerUnavailable => "steerUnavailable",
    BrakeUnavailable => "brakeUnavailable",
    ReverseGear => "reverseGear",
    CruiseDisabled => "cruiseDisabled",
    PlannerError => "plannerError",
    RelayMalfunction => "relayMalfunction",
    NoTarget => "noTarget",
    SpeedTooLow => "speedTooLow",
    SpeedTooHigh => "speedTooHigh",
    LowSpeedLockout => "lowSpeedLockout",
    LkasDisabled => "lkasDisabled",
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown event name '{s}'"))
    }
}

impl Serialize for EventName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
