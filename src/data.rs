// Copyright (C) 2026 The univmax Authors
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Serialize, Serializer};

use super::error::*;

/// Unit of a volume size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacityUnit {
    /// Megabytes.
    Mb,
    /// Gigabytes.
    Gb,
    /// Terabytes.
    Tb,
    /// Cylinders, 1 CYL is 1920 KiB on PowerMax.
    Cyl,
}

impl CapacityUnit {
    pub fn as_str(&self) -> &'static str {
        match *self {
            CapacityUnit::Mb => "MB",
            CapacityUnit::Gb => "GB",
            CapacityUnit::Tb => "TB",
            CapacityUnit::Cyl => "CYL",
        }
    }
}

impl Default for CapacityUnit {
    fn default() -> Self {
        CapacityUnit::Gb
    }
}

impl fmt::Display for CapacityUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for CapacityUnit {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> ::std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for CapacityUnit {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "MB" => Ok(CapacityUnit::Mb),
            "GB" => Ok(CapacityUnit::Gb),
            "TB" => Ok(CapacityUnit::Tb),
            "CYL" => Ok(CapacityUnit::Cyl),
            _ => Err(U4vError::InvalidInput(format!(
                "Invalid capacity unit '{}', should be one of MB, GB, TB \
                 or CYL",
                s
            ))),
        }
    }
}

/// Size of a new volume, e.g. `10GB`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSize {
    pub size: f64,
    pub unit: CapacityUnit,
}

impl VolumeSize {
    pub fn new(size: f64, unit: CapacityUnit) -> Self {
        VolumeSize { size, unit }
    }

    pub fn gb(size: f64) -> Self {
        VolumeSize::new(size, CapacityUnit::Gb)
    }

    /// Size in the form Unisphere expects in `volume_size`, integral sizes
    /// carry no fraction.
    pub fn size_str(&self) -> String {
        if self.size.fract() == 0f64 {
            format!("{}", self.size as u64)
        } else {
            format!("{}", self.size)
        }
    }
}

impl Default for VolumeSize {
    fn default() -> Self {
        VolumeSize::gb(0f64)
    }
}

impl FromStr for VolumeSize {
    type Err = U4vError;

    /// Parse a human string like `1GB`, `1.5 TB` or `100cyl`. The unit
    /// defaults to GB when omitted.
    fn from_str(s: &str) -> Result<Self> {
        let regex_size_human = Regex::new(
            r"(?x)
            ^
            ([0-9\.]+)          # 1: number
            [\ \t]*             # might have space between number and unit
            ([a-zA-Z]*)         # 2: units
            $
            ",
        )?;
        let cap = match regex_size_human.captures(s.trim()) {
            Some(c) => c,
            None => {
                return Err(U4vError::InvalidInput(format!(
                    "Invalid volume size '{}'",
                    s
                )))
            }
        };
        let size = match cap.get(1).map(|n| n.as_str().parse::<f64>()) {
            Some(Ok(n)) if n > 0f64 => n,
            _ => {
                return Err(U4vError::InvalidInput(format!(
                    "Invalid volume size '{}'",
                    s
                )))
            }
        };
        let unit = match cap.get(2).map(|u| u.as_str()) {
            Some(u) if !u.is_empty() => u.parse::<CapacityUnit>()?,
            _ => CapacityUnit::Gb,
        };
        Ok(VolumeSize { size, unit })
    }
}

/// SRDF storage group level actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SrdfAction {
    Establish,
    Split,
    Suspend,
    Restore,
    Resume,
    Failover,
    Failback,
    Swap,
    SetBias,
    SetMode,
}

impl SrdfAction {
    pub const ALL: [SrdfAction; 10] = [
        SrdfAction::Establish,
        SrdfAction::Split,
        SrdfAction::Suspend,
        SrdfAction::Restore,
        SrdfAction::Resume,
        SrdfAction::Failover,
        SrdfAction::Failback,
        SrdfAction::Swap,
        SrdfAction::SetBias,
        SrdfAction::SetMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            SrdfAction::Establish => "Establish",
            SrdfAction::Split => "Split",
            SrdfAction::Suspend => "Suspend",
            SrdfAction::Restore => "Restore",
            SrdfAction::Resume => "Resume",
            SrdfAction::Failover => "Failover",
            SrdfAction::Failback => "Failback",
            SrdfAction::Swap => "Swap",
            SrdfAction::SetBias => "SetBias",
            SrdfAction::SetMode => "SetMode",
        }
    }

    /// Key of the action specific parameter object, e.g. `suspend`.
    pub(crate) fn param_key(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(c) => format!("{}{}", c.to_lowercase(), chars.as_str()),
            None => String::new(),
        }
    }
}

impl FromStr for SrdfAction {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        for a in SrdfAction::ALL.iter() {
            if a.as_str().eq_ignore_ascii_case(s) {
                return Ok(*a);
            }
        }
        Err(U4vError::VolumeBackendApi(
            "SRDF Action must be one of [Establish, Split, Suspend, \
             Restore, Resume, Failover, Failback, Swap, SetBias, SetMode]"
                .to_string(),
        ))
    }
}

/// Actions on a MetroDR environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetroDrAction {
    Establish,
    Failover,
    Failback,
    Restore,
    SetMode,
    Split,
    Suspend,
    Recover,
    Resume,
    UpdateR1,
}

impl MetroDrAction {
    pub const ALL: [MetroDrAction; 10] = [
        MetroDrAction::Establish,
        MetroDrAction::Failover,
        MetroDrAction::Failback,
        MetroDrAction::Restore,
        MetroDrAction::SetMode,
        MetroDrAction::Split,
        MetroDrAction::Suspend,
        MetroDrAction::Recover,
        MetroDrAction::Resume,
        MetroDrAction::UpdateR1,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            MetroDrAction::Establish => "Establish",
            MetroDrAction::Failover => "Failover",
            MetroDrAction::Failback => "Failback",
            MetroDrAction::Restore => "Restore",
            MetroDrAction::SetMode => "SetMode",
            MetroDrAction::Split => "Split",
            MetroDrAction::Suspend => "Suspend",
            MetroDrAction::Recover => "Recover",
            MetroDrAction::Resume => "Resume",
            MetroDrAction::UpdateR1 => "UpdateR1",
        }
    }

    /// Key of the action specific parameter object, e.g. `suspend_param`.
    pub(crate) fn param_key(&self) -> String {
        format!("{}_param", self.as_str().to_lowercase())
    }
}

impl FromStr for MetroDrAction {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        for a in MetroDrAction::ALL.iter() {
            if a.as_str().eq_ignore_ascii_case(s) {
                return Ok(*a);
            }
        }
        Err(U4vError::VolumeBackendApi(
            "MetroDR Action must be one of [Establish, Failover, Failback, \
             Restore, SetMode, Split, Suspend, Recover, Resume, UpdateR1]"
                .to_string(),
        ))
    }
}

/// DR leg replication mode of a MetroDR environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrReplicationMode {
    Asynchronous,
    AdaptiveCopyDisk,
}

impl DrReplicationMode {
    pub fn as_str(&self) -> &'static str {
        match *self {
            DrReplicationMode::Asynchronous => "Asynchronous",
            DrReplicationMode::AdaptiveCopyDisk => "AdaptiveCopyDisk",
        }
    }
}

impl FromStr for DrReplicationMode {
    type Err = U4vError;

    /// Loose match, `async`, `ASYNCHRONOUS` and `Adaptive_Copy` all work.
    fn from_str(s: &str) -> Result<Self> {
        let u = s.to_uppercase().replace('_', "");
        if u.contains("ASYNC") {
            Ok(DrReplicationMode::Asynchronous)
        } else if u.contains("ADAPTIVECOPY") {
            Ok(DrReplicationMode::AdaptiveCopyDisk)
        } else {
            Err(U4vError::InvalidInput(
                "DR Replication Mode must be either Asynchronous or \
                 AdaptiveCopyDisk"
                    .to_string(),
            ))
        }
    }
}

/// RDF group modification actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RdfGroupAction {
    Move,
    AddPorts,
    RemovePorts,
    SetLabel,
}

impl RdfGroupAction {
    pub fn as_str(&self) -> &'static str {
        match *self {
            RdfGroupAction::Move => "Move",
            RdfGroupAction::AddPorts => "add_ports",
            RdfGroupAction::RemovePorts => "remove_ports",
            RdfGroupAction::SetLabel => "set_label",
        }
    }
}

/// Storage group migration session actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MigrationAction {
    Cutover,
    Sync,
    Commit,
    Recover,
    ReadyTgt,
}

impl MigrationAction {
    pub fn as_str(&self) -> &'static str {
        match *self {
            MigrationAction::Cutover => "Cutover",
            MigrationAction::Sync => "Sync",
            MigrationAction::Commit => "Commit",
            MigrationAction::Recover => "Recover",
            MigrationAction::ReadyTgt => "ReadyTgt",
        }
    }
}

/// Snapshot policy intervals accepted by Unisphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapshotPolicyInterval {
    TenMinutes,
    TwelveMinutes,
    FifteenMinutes,
    TwentyMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    ThreeHours,
    FourHours,
    SixHours,
    EightHours,
    TwelveHours,
    OneDay,
    SevenDays,
}

impl SnapshotPolicyInterval {
    pub const ALL: [SnapshotPolicyInterval; 14] = [
        SnapshotPolicyInterval::TenMinutes,
        SnapshotPolicyInterval::TwelveMinutes,
        SnapshotPolicyInterval::FifteenMinutes,
        SnapshotPolicyInterval::TwentyMinutes,
        SnapshotPolicyInterval::ThirtyMinutes,
        SnapshotPolicyInterval::OneHour,
        SnapshotPolicyInterval::TwoHours,
        SnapshotPolicyInterval::ThreeHours,
        SnapshotPolicyInterval::FourHours,
        SnapshotPolicyInterval::SixHours,
        SnapshotPolicyInterval::EightHours,
        SnapshotPolicyInterval::TwelveHours,
        SnapshotPolicyInterval::OneDay,
        SnapshotPolicyInterval::SevenDays,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            SnapshotPolicyInterval::TenMinutes => "10 Minutes",
            SnapshotPolicyInterval::TwelveMinutes => "12 Minutes",
            SnapshotPolicyInterval::FifteenMinutes => "15 Minutes",
            SnapshotPolicyInterval::TwentyMinutes => "20 Minutes",
            SnapshotPolicyInterval::ThirtyMinutes => "30 Minutes",
            SnapshotPolicyInterval::OneHour => "1 Hour",
            SnapshotPolicyInterval::TwoHours => "2 Hours",
            SnapshotPolicyInterval::ThreeHours => "3 Hours",
            SnapshotPolicyInterval::FourHours => "4 Hours",
            SnapshotPolicyInterval::SixHours => "6 Hours",
            SnapshotPolicyInterval::EightHours => "8 Hours",
            SnapshotPolicyInterval::TwelveHours => "12 Hours",
            SnapshotPolicyInterval::OneDay => "1 Day",
            SnapshotPolicyInterval::SevenDays => "7 Days",
        }
    }

    pub fn minutes(&self) -> u32 {
        match *self {
            SnapshotPolicyInterval::TenMinutes => 10,
            SnapshotPolicyInterval::TwelveMinutes => 12,
            SnapshotPolicyInterval::FifteenMinutes => 15,
            SnapshotPolicyInterval::TwentyMinutes => 20,
            SnapshotPolicyInterval::ThirtyMinutes => 30,
            SnapshotPolicyInterval::OneHour => 60,
            SnapshotPolicyInterval::TwoHours => 120,
            SnapshotPolicyInterval::ThreeHours => 180,
            SnapshotPolicyInterval::FourHours => 240,
            SnapshotPolicyInterval::SixHours => 360,
            SnapshotPolicyInterval::EightHours => 480,
            SnapshotPolicyInterval::TwelveHours => 720,
            SnapshotPolicyInterval::OneDay => 1440,
            SnapshotPolicyInterval::SevenDays => 10080,
        }
    }
}

impl FromStr for SnapshotPolicyInterval {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        for i in SnapshotPolicyInterval::ALL.iter() {
            if i.as_str().eq_ignore_ascii_case(s.trim()) {
                return Ok(*i);
            }
        }
        Err(U4vError::InvalidInput(
            "The interval supplied must be one of '10 Minutes', \
             '12 Minutes', '15 Minutes' etc."
                .to_string(),
        ))
    }
}

/// Snapshot policy modification actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapshotPolicyAction {
    Modify,
    Suspend,
    Resume,
    AssociateToStorageGroups,
    DisassociateFromStorageGroups,
}

impl SnapshotPolicyAction {
    pub fn as_str(&self) -> &'static str {
        match *self {
            SnapshotPolicyAction::Modify => "Modify",
            SnapshotPolicyAction::Suspend => "Suspend",
            SnapshotPolicyAction::Resume => "Resume",
            SnapshotPolicyAction::AssociateToStorageGroups => {
                "AssociateToStorageGroups"
            }
            SnapshotPolicyAction::DisassociateFromStorageGroups => {
                "DisassociateFromStorageGroups"
            }
        }
    }
}

impl FromStr for SnapshotPolicyAction {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        let all = [
            SnapshotPolicyAction::Modify,
            SnapshotPolicyAction::Suspend,
            SnapshotPolicyAction::Resume,
            SnapshotPolicyAction::AssociateToStorageGroups,
            SnapshotPolicyAction::DisassociateFromStorageGroups,
        ];
        for a in all.iter() {
            if a.as_str().eq_ignore_ascii_case(s) {
                return Ok(*a);
            }
        }
        Err(U4vError::InvalidInput(
            "The action supplied must be one of 'Modify', 'Suspend', \
             'Resume', 'AssociateToStorageGroups', \
             'DisassociateFromStorageGroups'."
                .to_string(),
        ))
    }
}

/// How a storage group host I/O limit is spread over directors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionType {
    Never,
    OnFailure,
    Always,
}

impl DistributionType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            DistributionType::Never => "Never",
            DistributionType::OnFailure => "OnFailure",
            DistributionType::Always => "Always",
        }
    }
}

impl FromStr for DistributionType {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "never" => Ok(DistributionType::Never),
            "onfailure" => Ok(DistributionType::OnFailure),
            "always" => Ok(DistributionType::Always),
            _ => Err(U4vError::InvalidInput(format!(
                "Wrong Distribution type '{}', should be one of Never, \
                 OnFailure or Always",
                s
            ))),
        }
    }
}

/// Requested QoS on a storage group. `None` means no limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QosSpecs {
    pub max_iops: Option<u64>,
    pub max_mbps: Option<u64>,
    pub distribution_type: Option<String>,
}

/// Part of a masking view used by
/// [`Provisioning::get_element_from_masking_view()`][1].
///
/// [1]: struct.Provisioning.html#method.get_element_from_masking_view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskingViewElement {
    PortGroup,
    Host,
    StorageGroup,
}

/// Performance data aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataFormat {
    Average,
    Maximum,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match *self {
            DataFormat::Average => "Average",
            DataFormat::Maximum => "Maximum",
        }
    }
}

impl Default for DataFormat {
    fn default() -> Self {
        DataFormat::Average
    }
}

impl FromStr for DataFormat {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        let u = s.to_uppercase();
        if u != "AVERAGE" && u != "MAXIMUM" {
            return Err(U4vError::InvalidInput(format!(
                "Invalid data format \"{}\" specified, please use one of \
                 Average or Maximum",
                s
            )));
        }
        if u.contains("MAXIMUM") {
            Ok(DataFormat::Maximum)
        } else {
            Ok(DataFormat::Average)
        }
    }
}

/// Performance metrics selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Metrics {
    /// Key performance indicators of the category.
    Kpi,
    /// Every metric known for the category.
    All,
    /// Explicit metric names.
    List(Vec<String>),
}

impl Metrics {
    pub fn one(metric: &str) -> Self {
        Metrics::List(vec![metric.to_string()])
    }
}

impl From<&str> for Metrics {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "KPI" => Metrics::Kpi,
            "ALL" => Metrics::All,
            _ => Metrics::one(s),
        }
    }
}

impl From<Vec<&str>> for Metrics {
    fn from(v: Vec<&str>) -> Self {
        Metrics::List(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Categories used by days to full reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DaysToFullCategory {
    Array,
    Srp,
    ThinPool,
}

impl DaysToFullCategory {
    pub fn as_str(&self) -> &'static str {
        match *self {
            DaysToFullCategory::Array => "Array",
            DaysToFullCategory::Srp => "SRP",
            DaysToFullCategory::ThinPool => "ThinPool",
        }
    }
}

/// Severity of a performance threshold alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdSeverity {
    Information,
    Warning,
    Critical,
}

impl ThresholdSeverity {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ThresholdSeverity::Information => "INFORMATION",
            ThresholdSeverity::Warning => "WARNING",
            ThresholdSeverity::Critical => "CRITICAL",
        }
    }
}

/// One threshold level of a performance metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdLevel {
    pub threshold: f64,
    pub occurrences: u32,
    pub samples: u32,
    pub severity: ThresholdSeverity,
}

impl ThresholdLevel {
    pub fn warning(threshold: f64) -> Self {
        ThresholdLevel {
            threshold,
            occurrences: 3,
            samples: 5,
            severity: ThresholdSeverity::Warning,
        }
    }

    pub fn critical(threshold: f64) -> Self {
        ThresholdLevel {
            threshold,
            occurrences: 3,
            samples: 5,
            severity: ThresholdSeverity::Critical,
        }
    }
}

/// Performance category of Unisphere diagnostic data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerformanceCategory {
    Array,
    BeDirector,
    BeEmulation,
    BePort,
    Board,
    CachePartition,
    Core,
    Database,
    DeviceGroup,
    Disk,
    DiskGroup,
    DiskTechPool,
    EdsDirector,
    EdsEmulation,
    ExternalDirector,
    ExternalDisk,
    ExternalDiskGroup,
    FeDirector,
    FeEmulation,
    FePort,
    FiconEmulation,
    FiconEmulationThread,
    FiconPortThread,
    Host,
    ImDirector,
    ImEmulation,
    Initiator,
    InitiatorByPort,
    IpInterface,
    IscsiTarget,
    PortGroup,
    Rdfa,
    Rdfs,
    RdfDirector,
    RdfEmulation,
    RdfPort,
    Srp,
    StorageContainer,
    StorageGroup,
    StorageGroupByPool,
    StorageResource,
    StorageResourceByPool,
    ThinPool,
}

const KPI_ARRAY: &[&str] = &[
    "HostIOs",
    "HostMBs",
    "FEReqs",
    "FEUtilization",
    "BEUtilization",
    "PercentCacheWP",
    "ReadResponseTime",
    "WriteResponseTime",
];
const EXTRA_ARRAY: &[&str] = &[
    "HostReads",
    "HostWrites",
    "HostMBReads",
    "HostMBWritten",
    "PercentReads",
    "PercentWrites",
    "PercentHit",
    "BEIOs",
    "BEReqs",
];
const KPI_DIRECTOR: &[&str] = &["PercentBusy", "IOs", "MBs"];
const EXTRA_DIRECTOR: &[&str] =
    &["ReadReqs", "WriteReqs", "QueueDepthUtilization"];
const KPI_PORT: &[&str] = &["PercentBusy", "IOs", "MBs"];
const EXTRA_PORT: &[&str] = &["ResponseTime", "Reads", "Writes"];
const KPI_BUSY: &[&str] = &["PercentBusy"];
const EXTRA_BUSY: &[&str] = &["IOs"];
const KPI_DISK: &[&str] = &["PercentBusy", "IOs", "MBs", "AvgResponseTime"];
const EXTRA_DISK: &[&str] = &["Reads", "Writes", "MBRead", "MBWritten"];
const KPI_HOST_IO: &[&str] =
    &["HostIOs", "HostMBs", "ReadResponseTime", "WriteResponseTime"];
const EXTRA_HOST_IO: &[&str] = &[
    "HostReads",
    "HostWrites",
    "HostMBReads",
    "HostMBWritten",
    "ResponseTime",
];
const KPI_SG: &[&str] = &[
    "HostIOs",
    "HostMBs",
    "ResponseTime",
    "ReadResponseTime",
    "WriteResponseTime",
    "PercentCacheWP",
];
const EXTRA_SG: &[&str] = &[
    "HostReads",
    "HostWrites",
    "HostMBReads",
    "HostMBWritten",
    "PercentRead",
    "PercentWrite",
    "PercentHit",
    "AllocatedCapacity",
];
const KPI_POOL: &[&str] = &["HostIOs", "HostMBs", "ResponseTime"];
const EXTRA_POOL: &[&str] =
    &["UsedCapacity", "TotalPoolCapacity", "PercentUsedCapacity"];
const KPI_RDFA: &[&str] = &["HostWrites", "AvgCycleTime", "WriteReqs"];
const EXTRA_RDFA: &[&str] = &["CycleNumber", "HostMBWritten", "LocalWPCount"];
const KPI_RDFS: &[&str] = &["HostWrites", "ResponseTime", "WriteReqs"];
const EXTRA_RDFS: &[&str] = &["HostMBWritten", "MBWritten"];

impl PerformanceCategory {
    pub const ALL: [PerformanceCategory; 43] = [
        PerformanceCategory::Array,
        PerformanceCategory::BeDirector,
        PerformanceCategory::BeEmulation,
        PerformanceCategory::BePort,
        PerformanceCategory::Board,
        PerformanceCategory::CachePartition,
        PerformanceCategory::Core,
        PerformanceCategory::Database,
        PerformanceCategory::DeviceGroup,
        PerformanceCategory::Disk,
        PerformanceCategory::DiskGroup,
        PerformanceCategory::DiskTechPool,
        PerformanceCategory::EdsDirector,
        PerformanceCategory::EdsEmulation,
        PerformanceCategory::ExternalDirector,
        PerformanceCategory::ExternalDisk,
        PerformanceCategory::ExternalDiskGroup,
        PerformanceCategory::FeDirector,
        PerformanceCategory::FeEmulation,
        PerformanceCategory::FePort,
        PerformanceCategory::FiconEmulation,
        PerformanceCategory::FiconEmulationThread,
        PerformanceCategory::FiconPortThread,
        PerformanceCategory::Host,
        PerformanceCategory::ImDirector,
        PerformanceCategory::ImEmulation,
        PerformanceCategory::Initiator,
        PerformanceCategory::InitiatorByPort,
        PerformanceCategory::IpInterface,
        PerformanceCategory::IscsiTarget,
        PerformanceCategory::PortGroup,
        PerformanceCategory::Rdfa,
        PerformanceCategory::Rdfs,
        PerformanceCategory::RdfDirector,
        PerformanceCategory::RdfEmulation,
        PerformanceCategory::RdfPort,
        PerformanceCategory::Srp,
        PerformanceCategory::StorageContainer,
        PerformanceCategory::StorageGroup,
        PerformanceCategory::StorageGroupByPool,
        PerformanceCategory::StorageResource,
        PerformanceCategory::StorageResourceByPool,
        PerformanceCategory::ThinPool,
    ];

    /// Name used in Unisphere performance URIs.
    pub fn as_str(&self) -> &'static str {
        match *self {
            PerformanceCategory::Array => "Array",
            PerformanceCategory::BeDirector => "BEDirector",
            PerformanceCategory::BeEmulation => "BEEmulation",
            PerformanceCategory::BePort => "BEPort",
            PerformanceCategory::Board => "Board",
            PerformanceCategory::CachePartition => "CachePartition",
            PerformanceCategory::Core => "Core",
            PerformanceCategory::Database => "Database",
            PerformanceCategory::DeviceGroup => "DeviceGroup",
            PerformanceCategory::Disk => "Disk",
            PerformanceCategory::DiskGroup => "DiskGroup",
            PerformanceCategory::DiskTechPool => "DiskTechPool",
            PerformanceCategory::EdsDirector => "EDSDirector",
            PerformanceCategory::EdsEmulation => "EDSEmulation",
            PerformanceCategory::ExternalDirector => "ExternalDirector",
            PerformanceCategory::ExternalDisk => "ExternalDisk",
            PerformanceCategory::ExternalDiskGroup => "ExternalDiskGroup",
            PerformanceCategory::FeDirector => "FEDirector",
            PerformanceCategory::FeEmulation => "FEEmulation",
            PerformanceCategory::FePort => "FEPort",
            PerformanceCategory::FiconEmulation => "FICONEmulation",
            PerformanceCategory::FiconEmulationThread => {
                "FICONEmulationThread"
            }
            PerformanceCategory::FiconPortThread => "FICONPortThread",
            PerformanceCategory::Host => "Host",
            PerformanceCategory::ImDirector => "IMDirector",
            PerformanceCategory::ImEmulation => "IMEmulation",
            PerformanceCategory::Initiator => "Initiator",
            PerformanceCategory::InitiatorByPort => "InitiatorByPort",
            PerformanceCategory::IpInterface => "IPInterface",
            PerformanceCategory::IscsiTarget => "ISCSITarget",
            PerformanceCategory::PortGroup => "PortGroup",
            PerformanceCategory::Rdfa => "RDFA",
            PerformanceCategory::Rdfs => "RDFS",
            PerformanceCategory::RdfDirector => "RDFDirector",
            PerformanceCategory::RdfEmulation => "RDFEmulation",
            PerformanceCategory::RdfPort => "RDFPort",
            PerformanceCategory::Srp => "SRP",
            PerformanceCategory::StorageContainer => "StorageContainer",
            PerformanceCategory::StorageGroup => "StorageGroup",
            PerformanceCategory::StorageGroupByPool => "StorageGroupByPool",
            PerformanceCategory::StorageResource => "StorageResource",
            PerformanceCategory::StorageResourceByPool => {
                "StorageResourceByPool"
            }
            PerformanceCategory::ThinPool => "ThinPool",
        }
    }

    /// Request body keys identifying one object of this category.
    pub fn id_keys(&self) -> &'static [&'static str] {
        match *self {
            PerformanceCategory::Array => &[],
            PerformanceCategory::BeDirector
            | PerformanceCategory::EdsDirector
            | PerformanceCategory::ExternalDirector
            | PerformanceCategory::FeDirector
            | PerformanceCategory::ImDirector
            | PerformanceCategory::RdfDirector => &["directorId"],
            PerformanceCategory::BePort
            | PerformanceCategory::FePort
            | PerformanceCategory::RdfPort => &["directorId", "portId"],
            PerformanceCategory::BeEmulation => &["beEmulationId"],
            PerformanceCategory::Board => &["boardId"],
            PerformanceCategory::CachePartition => &["cachePartitionId"],
            PerformanceCategory::Core => &["coreId"],
            PerformanceCategory::Database => &["databaseId"],
            PerformanceCategory::DeviceGroup => &["deviceGroupId"],
            PerformanceCategory::Disk | PerformanceCategory::ExternalDisk => {
                &["diskId"]
            }
            PerformanceCategory::DiskGroup
            | PerformanceCategory::ExternalDiskGroup => &["diskGroupId"],
            PerformanceCategory::DiskTechPool => &["diskTechnology"],
            PerformanceCategory::EdsEmulation => &["edsEmulationId"],
            PerformanceCategory::FeEmulation => &["feEmulationId"],
            PerformanceCategory::FiconEmulation => &["ficonEmulationId"],
            PerformanceCategory::FiconEmulationThread => {
                &["ficonEmulationThreadId"]
            }
            PerformanceCategory::FiconPortThread => &["ficonPortThreadId"],
            PerformanceCategory::Host => &["hostId"],
            PerformanceCategory::ImEmulation => &["imEmulationId"],
            PerformanceCategory::Initiator => &["initiatorId"],
            PerformanceCategory::InitiatorByPort => &["initiatorByPortId"],
            PerformanceCategory::IpInterface => &["ipInterfaceId"],
            PerformanceCategory::IscsiTarget => &["iSCSITargetId"],
            PerformanceCategory::PortGroup => &["portGroupId"],
            PerformanceCategory::Rdfa | PerformanceCategory::Rdfs => {
                &["raGroupId"]
            }
            PerformanceCategory::RdfEmulation => &["rdfEmulationId"],
            PerformanceCategory::Srp => &["srpId"],
            PerformanceCategory::StorageContainer => &["storageContainerId"],
            PerformanceCategory::StorageGroup => &["storageGroupId"],
            PerformanceCategory::StorageGroupByPool => {
                &["storageGroupId", "poolId"]
            }
            PerformanceCategory::StorageResource
            | PerformanceCategory::StorageResourceByPool => {
                &["storageContainerId", "storageResourceId"]
            }
            PerformanceCategory::ThinPool => &["poolId"],
        }
    }

    /// Request body keys needed to list the keys of this category.
    pub fn key_scope(&self) -> &'static [&'static str] {
        match *self {
            PerformanceCategory::BePort
            | PerformanceCategory::FePort
            | PerformanceCategory::RdfPort => &["directorId"],
            PerformanceCategory::StorageGroupByPool => &["storageGroupId"],
            PerformanceCategory::StorageResourceByPool => {
                &["storageContainerId", "storageResourceId"]
            }
            _ => &[],
        }
    }

    /// Key of the object list in a key list reply.
    pub fn info_key(&self) -> &'static str {
        match *self {
            PerformanceCategory::Array => "arrayInfo",
            PerformanceCategory::BeDirector => "beDirectorInfo",
            PerformanceCategory::BeEmulation => "beEmulationInfo",
            PerformanceCategory::BePort => "bePortInfo",
            PerformanceCategory::Board => "boardInfo",
            PerformanceCategory::CachePartition => "cachePartitionInfo",
            PerformanceCategory::Core => "coreInfo",
            PerformanceCategory::Database => "databaseInfo",
            PerformanceCategory::DeviceGroup => "deviceGroupInfo",
            PerformanceCategory::Disk => "diskInfo",
            PerformanceCategory::DiskGroup => "diskGroupInfo",
            PerformanceCategory::DiskTechPool => "diskTechPoolInfo",
            PerformanceCategory::EdsDirector => "edsDirectorInfo",
            PerformanceCategory::EdsEmulation => "edsEmulationInfo",
            PerformanceCategory::ExternalDirector => "externalDirectorInfo",
            PerformanceCategory::ExternalDisk => "externalDiskInfo",
            PerformanceCategory::ExternalDiskGroup => "externalDiskGroupInfo",
            PerformanceCategory::FeDirector => "feDirectorInfo",
            PerformanceCategory::FeEmulation => "feEmulationInfo",
            PerformanceCategory::FePort => "fePortInfo",
            PerformanceCategory::FiconEmulation => "ficonEmulationInfo",
            PerformanceCategory::FiconEmulationThread => {
                "ficonEmulationThreadInfo"
            }
            PerformanceCategory::FiconPortThread => "ficonPortThreadInfo",
            PerformanceCategory::Host => "hostInfo",
            PerformanceCategory::ImDirector => "imDirectorInfo",
            PerformanceCategory::ImEmulation => "iMEmulationInfo",
            PerformanceCategory::Initiator => "initiatorInfo",
            PerformanceCategory::InitiatorByPort => "initiatorByPortInfo",
            PerformanceCategory::IpInterface => "iSCSIClientInfo",
            PerformanceCategory::IscsiTarget => "iSCSITargetInfo",
            PerformanceCategory::PortGroup => "portGroupInfo",
            PerformanceCategory::Rdfa => "rdfaInfo",
            PerformanceCategory::Rdfs => "rdfsInfo",
            PerformanceCategory::RdfDirector => "rdfDirectorInfo",
            PerformanceCategory::RdfEmulation => "rdfEmulationInfo",
            PerformanceCategory::RdfPort => "rdfPortInfo",
            PerformanceCategory::Srp => "srpInfo",
            PerformanceCategory::StorageContainer => "storageContainerInfo",
            PerformanceCategory::StorageGroup => "storageGroupInfo",
            PerformanceCategory::StorageGroupByPool
            | PerformanceCategory::StorageResourceByPool
            | PerformanceCategory::ThinPool => "poolInfo",
            PerformanceCategory::StorageResource => "storageResourceInfo",
        }
    }

    /// Keys of these categories only cover a time range, the array level
    /// time range is used when none is given.
    pub fn is_time_ranged(&self) -> bool {
        match *self {
            PerformanceCategory::Host
            | PerformanceCategory::Initiator
            | PerformanceCategory::InitiatorByPort
            | PerformanceCategory::StorageGroupByPool
            | PerformanceCategory::StorageResourceByPool => true,
            _ => false,
        }
    }

    fn metric_groups(
        &self,
    ) -> (&'static [&'static str], &'static [&'static str]) {
        match *self {
            PerformanceCategory::Array => (KPI_ARRAY, EXTRA_ARRAY),
            PerformanceCategory::BeDirector
            | PerformanceCategory::FeDirector
            | PerformanceCategory::RdfDirector
            | PerformanceCategory::EdsDirector
            | PerformanceCategory::ImDirector
            | PerformanceCategory::ExternalDirector => {
                (KPI_DIRECTOR, EXTRA_DIRECTOR)
            }
            PerformanceCategory::BePort
            | PerformanceCategory::FePort
            | PerformanceCategory::RdfPort
            | PerformanceCategory::PortGroup
            | PerformanceCategory::IpInterface
            | PerformanceCategory::IscsiTarget => (KPI_PORT, EXTRA_PORT),
            PerformanceCategory::BeEmulation
            | PerformanceCategory::FeEmulation
            | PerformanceCategory::EdsEmulation
            | PerformanceCategory::ImEmulation
            | PerformanceCategory::RdfEmulation
            | PerformanceCategory::FiconEmulation
            | PerformanceCategory::FiconEmulationThread
            | PerformanceCategory::FiconPortThread
            | PerformanceCategory::Board
            | PerformanceCategory::Core => (KPI_BUSY, EXTRA_BUSY),
            PerformanceCategory::Disk
            | PerformanceCategory::DiskGroup
            | PerformanceCategory::DiskTechPool
            | PerformanceCategory::ExternalDisk
            | PerformanceCategory::ExternalDiskGroup => (KPI_DISK, EXTRA_DISK),
            PerformanceCategory::Host
            | PerformanceCategory::Initiator
            | PerformanceCategory::InitiatorByPort
            | PerformanceCategory::CachePartition
            | PerformanceCategory::Database
            | PerformanceCategory::DeviceGroup => (KPI_HOST_IO, EXTRA_HOST_IO),
            PerformanceCategory::StorageGroup
            | PerformanceCategory::StorageGroupByPool => (KPI_SG, EXTRA_SG),
            PerformanceCategory::Srp
            | PerformanceCategory::ThinPool
            | PerformanceCategory::StorageContainer
            | PerformanceCategory::StorageResource
            | PerformanceCategory::StorageResourceByPool => {
                (KPI_POOL, EXTRA_POOL)
            }
            PerformanceCategory::Rdfa => (KPI_RDFA, EXTRA_RDFA),
            PerformanceCategory::Rdfs => (KPI_RDFS, EXTRA_RDFS),
        }
    }

    /// Known metrics of this category, KPI ones only when `kpi_only`.
    pub fn metrics(&self, kpi_only: bool) -> Vec<String> {
        let (kpi, extra) = self.metric_groups();
        let mut ret: Vec<String> = kpi.iter().map(|m| m.to_string()).collect();
        if !kpi_only {
            ret.extend(extra.iter().map(|m| m.to_string()));
        }
        ret
    }
}

impl fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PerformanceCategory {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        for c in PerformanceCategory::ALL.iter() {
            if c.as_str().eq_ignore_ascii_case(s) {
                return Ok(*c);
            }
        }
        Err(U4vError::InvalidInput(format!(
            "Invalid category \"{}\" supplied, please correct the supplied \
             category and try again.",
            s
        )))
    }
}

/// Object types of the enhanced API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageObject {
    Directors,
    Hosts,
    Initiators,
    IpInterfaces,
    IpRoutes,
    MaskingViews,
    PortGroups,
    Ports,
    RdfGroups,
    StorageGroups,
    Volumes,
}

impl StorageObject {
    pub const ALL: [StorageObject; 11] = [
        StorageObject::Directors,
        StorageObject::Hosts,
        StorageObject::Initiators,
        StorageObject::IpInterfaces,
        StorageObject::IpRoutes,
        StorageObject::MaskingViews,
        StorageObject::PortGroups,
        StorageObject::Ports,
        StorageObject::RdfGroups,
        StorageObject::StorageGroups,
        StorageObject::Volumes,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            StorageObject::Directors => "directors",
            StorageObject::Hosts => "hosts",
            StorageObject::Initiators => "initiators",
            StorageObject::IpInterfaces => "ip-interfaces",
            StorageObject::IpRoutes => "ip-routes",
            StorageObject::MaskingViews => "masking-views",
            StorageObject::PortGroups => "port-groups",
            StorageObject::Ports => "ports",
            StorageObject::RdfGroups => "rdf-groups",
            StorageObject::StorageGroups => "storage-groups",
            StorageObject::Volumes => "volumes",
        }
    }
}

impl FromStr for StorageObject {
    type Err = U4vError;
    fn from_str(s: &str) -> Result<Self> {
        for o in StorageObject::ALL.iter() {
            if o.as_str().eq_ignore_ascii_case(s) {
                return Ok(*o);
            }
        }
        Err(U4vError::InvalidInput(format!(
            "Storage object \"{}\" is not one of {:?}",
            s,
            StorageObject::ALL.iter().map(|o| o.as_str()).collect::<Vec<_>>()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_size_parse() {
        let s: VolumeSize = "10GB".parse().unwrap();
        assert_eq!(s, VolumeSize::gb(10f64));
        assert_eq!(s.size_str(), "10");
        let s: VolumeSize = "1.5 tb".parse().unwrap();
        assert_eq!(s.unit, CapacityUnit::Tb);
        assert_eq!(s.size_str(), "1.5");
        let s: VolumeSize = "30".parse().unwrap();
        assert_eq!(s.unit, CapacityUnit::Gb);
        assert!("ten GB".parse::<VolumeSize>().is_err());
        assert!("10PB".parse::<VolumeSize>().is_err());
    }

    #[test]
    fn srdf_action_parse() {
        assert_eq!(
            "setbias".parse::<SrdfAction>().unwrap(),
            SrdfAction::SetBias
        );
        assert_eq!(SrdfAction::SetMode.param_key(), "setMode");
        assert!(matches!(
            "explode".parse::<SrdfAction>(),
            Err(U4vError::VolumeBackendApi(_))
        ));
    }

    #[test]
    fn dr_mode_parse() {
        assert_eq!(
            "asynchronous".parse::<DrReplicationMode>().unwrap(),
            DrReplicationMode::Asynchronous
        );
        assert_eq!(
            "Adaptive_Copy".parse::<DrReplicationMode>().unwrap(),
            DrReplicationMode::AdaptiveCopyDisk
        );
        assert!("synchronous".parse::<DrReplicationMode>().is_err());
    }

    #[test]
    fn snapshot_interval() {
        let i: SnapshotPolicyInterval = "1 day".parse().unwrap();
        assert_eq!(i.as_str(), "1 Day");
        assert_eq!(i.minutes(), 1440);
        assert!("5 Minutes".parse::<SnapshotPolicyInterval>().is_err());
    }

    #[test]
    fn data_format_parse() {
        assert_eq!(
            "maximum".parse::<DataFormat>().unwrap(),
            DataFormat::Maximum
        );
        assert!("Median".parse::<DataFormat>().is_err());
    }

    #[test]
    fn metrics_from_str() {
        assert_eq!(Metrics::from("kpi"), Metrics::Kpi);
        assert_eq!(Metrics::from("All"), Metrics::All);
        assert_eq!(
            Metrics::from("PercentBusy"),
            Metrics::List(vec!["PercentBusy".to_string()])
        );
    }

    #[test]
    fn performance_category_metadata() {
        let c: PerformanceCategory = "fedirector".parse().unwrap();
        assert_eq!(c, PerformanceCategory::FeDirector);
        assert_eq!(c.info_key(), "feDirectorInfo");
        assert_eq!(
            PerformanceCategory::StorageResource.id_keys(),
            &["storageContainerId", "storageResourceId"]
        );
        assert!(PerformanceCategory::Host.is_time_ranged());
        assert!(!PerformanceCategory::StorageGroup.is_time_ranged());
        let kpi = PerformanceCategory::Array.metrics(true);
        let all = PerformanceCategory::Array.metrics(false);
        assert!(kpi.len() < all.len());
        assert!(all.starts_with(&kpi));
        assert!("Widget".parse::<PerformanceCategory>().is_err());
    }

    #[test]
    fn storage_object_names() {
        let o: StorageObject = "Masking-Views".parse().unwrap();
        assert_eq!(o, StorageObject::MaskingViews);
        assert_eq!(o.as_str(), "masking-views");
        assert!(matches!(
            "widgets".parse::<StorageObject>(),
            Err(U4vError::InvalidInput(_))
        ));
    }
}
