use serde::Serialize;
use std::result::Result as StdResult;
use thiserror::Error as ThisError;

/// Unified decode result type
pub type Result<T> = StdResult<T, DecodeError>;

/// Failure of a single decode step.
///
/// None of these abort a whole PDU: they are recorded at the smallest
/// enclosing structure (one item, one SZL record, one alarm object) and the
/// decoder moves on with the sibling that follows.
#[derive(Debug, Clone, PartialEq, Eq, ThisError, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeError {
    /// Buffer failed the minimum-length, protocol-id or ROSCTR heuristic
    #[error("not an S7comm PDU")]
    NotThisProtocol,

    /// A field read would cross the declared section or buffer end
    #[error("truncated at offset {offset}: needed {needed} bytes, available {available} bytes")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A dispatch code has no table entry; bytes are kept opaque
    #[error("unknown {context} {code:#x}")]
    UnknownVariant { context: &'static str, code: u32 },

    /// A length field disagrees with the bytes actually available
    #[error("inconsistent length: declared {declared} bytes, consumed {consumed} bytes")]
    InconsistentLength { declared: usize, consumed: usize },
}

impl DecodeError {
    #[inline]
    pub(crate) fn unknown(context: &'static str, code: impl Into<u32>) -> Self {
        DecodeError::UnknownVariant {
            context,
            code: code.into(),
        }
    }

    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

wire_enum! {
    /// Error class carried in the Ack/AckData header
    pub enum ErrorClass: u8 {
        NoError = 0x00 => "No error",
        ApplicationRelationship = 0x81 => "Application relationship",
        ObjectDefinition = 0x82 => "Object definition",
        NoResources = 0x83 => "No resources available",
        ServiceProcessing = 0x84 => "Error on service processing",
        Supplies = 0x85 => "Error on supplies",
        Access = 0x87 => "Access error",
    }
}

wire_enum! {
    /// S7 error codes shared by the Ack/AckData header (`class << 8 | code`),
    /// the block transfer parameters and the user-data parameter header.
    pub enum ErrorCode: u16 {
        NoError = 0x0000 => "No error",
        InvalidBlockNumber = 0x0110 => "Invalid block number",
        InvalidRequestLength = 0x0111 => "Invalid request length",
        InvalidParams = 0x0112 => "Invalid parameter",
        InvalidBlockType = 0x0113 => "Invalid block type",
        BlockNotFound = 0x0114 => "Block not found",
        BlockAlreadyExists = 0x0115 => "Block already exists",
        BlockWriteProtected = 0x0116 => "Block is write-protected",
        BlockUpdateTooLarge = 0x0117 => "The block/operating system update is too large",
        BlockNumberInvalid = 0x0118 => "Invalid block number",
        InvalidPassword = 0x0119 => "Incorrect password entered",
        PGResourceError = 0x011A => "PG resource error",
        PLCResourceError = 0x011B => "PLC resource error",
        ProtocolError = 0x011C => "Protocol error",
        TooManyBlock = 0x011D => "Too many blocks (module-related restriction)",
        SessionExpired = 0x011E => "There is no longer a connection to the database, or S7DOS handle is invalid",
        ResultBufferTooSmall = 0x011F => "Result buffer too small",
        BlockEndList = 0x0120 => "End of block list",
        InsufficientAvailableMemory = 0x0140 => "Insufficient memory available",
        JobNotProcessed = 0x0141 => "Job cannot be processed because of a lack of resources",
        ServiceNotAllowedInCurrentState = 0x8001 => "The requested service cannot be performed while the block is in the current status",
        BlockTransferProtocolError = 0x8003 => "S7 protocol error: Error occurred while transferring the block",
        UnknownServiceOnRemoteModule = 0x8100 => "Application, general error: Service unknown to remote module",
        ServiceNotImplementedOrFrameError = 0x8104 => "This service is not implemented on the module or a frame error was reported",
        ObjectTypeMismatch = 0x8204 => "The type specification for the object is inconsistent",
        CopiedBlockExistsUnlinked = 0x8205 => "A copied block already exists and is not linked",
        MemoryOrStorageUnavailable = 0x8301 => "Insufficient memory space or work memory on the module, or specified storage medium not accessible",
        ResourcesInsufficientOrCpuBusy = 0x8302 => "Too few resources available or the processor resources are not available",
        ParallelUploadNotPossible = 0x8304 => "No further parallel upload possible. There is a resource bottleneck",
        FunctionUnavailable = 0x8305 => "Function not available",
        WorkMemoryInsufficient = 0x8306 => "Insufficient work memory (for copying, linking, loading AWP)",
        RetentiveMemoryInsufficient = 0x8307 => "Not enough retentive work memory (for copying, linking, loading AWP)",
        InvalidServiceSequence = 0x8401 => "S7 protocol error: Invalid service sequence (for example, loading or uploading a block)",
        ServiceBlockedByObjectState = 0x8402 => "Service cannot execute owing to status of the addressed object",
        FunctionCannotBeExecuted = 0x8404 => "S7 protocol: The function cannot be performed",
        RemoteBlockDisabled = 0x8405 => "Remote block is in DISABLE state (CFB). The function cannot be performed",
        FrameError = 0x8500 => "S7 protocol error: Wrong frames",
        ServiceAbortedEarly = 0x8503 => "Alarm from the module: Service canceled prematurely",
        ObjectAddressingError = 0x8701 => "Error addressing the object on the communications partner (for example, area length error)",
        ServiceNotSupportedByModule = 0x8702 => "The requested service is not supported by the module",
        ObjectAccessDenied = 0x8703 => "Access to object refused",
        ObjectCorrupted = 0x8704 => "Access error: Object damaged",
        IllegalJobNumber = 0xD001 => "Protocol error: Illegal job number",
        IllegalJobVariant = 0xD002 => "Parameter error: Illegal job variant",
        DebugNotSupported = 0xD003 => "Parameter error: Debugging function not supported by module",
        IllegalJobState = 0xD004 => "Parameter error: Illegal job status",
        IllegalJobAbort = 0xD005 => "Parameter error: Illegal job termination",
        IllegalDisconnectId = 0xD006 => "Parameter error: Illegal link disconnection ID",
        IllegalBufferElementCount = 0xD007 => "Parameter error: Illegal number of buffer elements",
        IllegalScanRate = 0xD008 => "Parameter error: Illegal scan rate",
        IllegalExecutionCount = 0xD009 => "Parameter error: Illegal number of executions",
        IllegalTriggerEvent = 0xD00A => "Parameter error: Illegal trigger event",
        IllegalTriggerCondition = 0xD00B => "Parameter error: Illegal trigger condition",
        BlockNotExistInPath = 0xD011 => "Parameter error in path of the call environment: Block does not exist",
        AddressErrorInBlock = 0xD012 => "Parameter error: Wrong address in block",
        DeletingOrOverwritingBlock = 0xD014 => "Parameter error: Block being deleted/overwritten",
        IllegalTagAddress = 0xD015 => "Parameter error: Illegal tag address",
        TestJobNotPossibleUserProgramError = 0xD016 => "Parameter error: Test jobs not possible, because of errors in user program",
        IllegalTriggerNumber = 0xD017 => "Parameter error: Illegal trigger number",
        InvalidPath = 0xD025 => "Parameter error: Invalid path",
        IllegalAccessType = 0xD026 => "Parameter error: Illegal access type",
        TooManyDataBlocks = 0xD027 => "Parameter error: This number of data blocks is not permitted",
        InternalProtocolError = 0xD031 => "Internal protocol error",
        ResultBufferLengthError = 0xD032 => "Parameter error: Wrong result buffer length",
        JobLengthError = 0xD033 => "Protocol error: Wrong job length",
        ParamSectionEncodingError = 0xD03F => "Coding error: Error in parameter section (for example, reserve bytes not equal to 0)",
        IllegalStateListId = 0xD041 => "Data error: Illegal status list ID",
        IllegalTagAddressData = 0xD042 => "Data error: Illegal tag address",
        ReferencedJobMissing = 0xD043 => "Data error: Referenced job not found, check job data",
        IllegalTagValue = 0xD044 => "Data error: Illegal tag value, check job data",
        ODISExitNotAllowedInHold = 0xD045 => "Data error: Exiting the ODIS control is not allowed in HOLD",
        IllegalMeasurementPhase = 0xD046 => "Data error: Illegal measuring stage during run-time measurement",
        IllegalHierarchyInReadJobList = 0xD047 => "Data error: Illegal hierarchy in 'Read job list'",
        IllegalDeleteId = 0xD048 => "Data error: Illegal deletion ID in 'Delete job'",
        InvalidReplaceId = 0xD049 => "Invalid substitute ID in 'Replace job'",
        ProgramStatusError = 0xD04A => "Error executing 'program status'",
        DataSectionEncodingError = 0xD05F => "Coding error: Error in data section (for example, reserve bytes not equal to 0)",
        NoMemoryForJob = 0xD061 => "Resource error: No memory space for job",
        JobListFull = 0xD062 => "Resource error: Job list full",
        TriggerEventOccupied = 0xD063 => "Resource error: Trigger event occupied",
        NoMemoryForResultElement = 0xD064 => "Resource error: Not enough memory space for one result buffer element",
        NoMemoryForResultElements = 0xD065 => "Resource error: Not enough memory space for several result buffer elements",
        TimerOccupiedByAnotherJob = 0xD066 => "Resource error: The timer available for run-time measurement is occupied by another job",
        TooManyModifyJobs = 0xD067 => "Resource error: Too many 'modify tag' jobs active",
        FunctionNotAllowedInCurrentMode = 0xD081 => "Function not permitted in current mode",
        CannotExitHoldMode = 0xD082 => "Mode error: Cannot exit HOLD mode",
        FunctionNotAllowedAtProtectionLevel = 0xD0A1 => "Function not permitted in current protection level",
        BusyDueToMemoryModifyingFunction = 0xD0A2 => "Function not possible at present, because a function is running that modifies memory",
        TooManyModifyJobsOnIO = 0xD0A3 => "Too many 'modify tag' jobs active on the I/O",
        ForcingAlreadyActive = 0xD0A4 => "'Forcing' has already been established",
        ReferencedJobNotFound = 0xD0A5 => "Referenced job not found",
        CannotDisableEnableJob = 0xD0A6 => "Job cannot be disabled/enabled",
        CannotDeleteJob = 0xD0A7 => "Job cannot be deleted, for example because it is currently being read",
        CannotReplaceJob = 0xD0A8 => "Job cannot be replaced, for example because it is currently being read or deleted",
        CannotReadJob = 0xD0A9 => "Job cannot be read, for example because it is currently being deleted",
        ProcessingTimeout = 0xD0AA => "Time limit exceeded in processing operation",
        InvalidProcessJobParams = 0xD0AB => "Invalid job parameters in process operation",
        InvalidProcessJobData = 0xD0AC => "Invalid job data in process operation",
        OperationModeSet = 0xD0AD => "Operating mode already set",
        JobBoundToAnotherConnection = 0xD0AE => "The job was set up over a different connection and can only be handled over this connection",
        TagAccessErrorDetected = 0xD0C1 => "At least one error has been detected while accessing the tag(s)",
        SwitchedToStopOrHold = 0xD0C2 => "Change to STOP/HOLD mode",
        TagAccessErrorThenStopOrHold = 0xD0C3 => "At least one error was detected while accessing the tag(s). Mode change to STOP/HOLD",
        RuntimeMeasurementTimeout = 0xD0C4 => "Timeout during run-time measurement",
        BlockStackInconsistent = 0xD0C5 => "Display of block stack inconsistent, because blocks were deleted/reloaded",
        JobDeletedDueToReferencedJobDeleted = 0xD0C6 => "Job was automatically deleted as the jobs it referenced have been deleted",
        JobAutoDeletedDueToStopExit = 0xD0C7 => "The job was automatically deleted because STOP mode was exited",
        BlockStatusAbortedDueToInconsistency = 0xD0C8 => "'Block status' aborted because of inconsistencies between test job and running program",
        ExitStateAreaByResetOB90 = 0xD0C9 => "Exit the status area by resetting OB90",
        ExitStateAreaByResetOB90AndReadError = 0xD0CA => "Exiting the status range by resetting OB90 and access error reading tags before exiting",
        PeripheralOutputDisableReactivated = 0xD0CB => "The output disable for the peripheral outputs has been activated again",
        DebugDataVolumeTimeLimited = 0xD0CC => "The amount of data for the debugging functions is restricted by the time limit",
        SyntaxErrorInBlockName = 0xD201 => "Syntax error in block name",
        SyntaxErrorInFunctionParams = 0xD202 => "Syntax error in function parameters",
        LinkedBlockExistsInRAM = 0xD205 => "Linked block already exists in RAM: Conditional copying is not possible",
        LinkedBlockExistsInEPROM = 0xD206 => "Linked block already exists in EPROM: Conditional copying is not possible",
        MaxUnlinkedBlocksExceeded = 0xD208 => "Maximum number of copied (not linked) blocks on module exceeded",
        GivenBlockNotFoundOnModule = 0xD209 => "(At least) one of the given blocks not found on the module",
        MaxBlocksLinkedPerJobExceeded = 0xD20A => "The maximum number of blocks that can be linked with one job was exceeded",
        MaxBlocksDeletablePerJobExceeded = 0xD20B => "The maximum number of blocks that can be deleted with one job was exceeded",
        OBPriorityMissing = 0xD20C => "OB cannot be copied because the associated priority class does not exist",
        SDBNotInterpretable = 0xD20D => "SDB cannot be interpreted (for example, unknown number)",
        NoMoreBlocksAvailable = 0xD20E => "No (further) block available",
        ModuleSpecificMaxBlockSizeExceeded = 0xD20F => "Module-specific maximum block size exceeded",
        InvalidBlockNumberD210 = 0xD210 => "Invalid block number",
        HeaderAttributesIncorrect = 0xD212 => "Incorrect header attribute (run-time relevant)",
        TooManySDBs = 0xD213 => "Too many SDBs. Note the restrictions on the module being used",
        InvalidUserProgramResetModule = 0xD216 => "Invalid user program - reset module",
        ProtectionLevelNotAllowed = 0xD217 => "Protection level specified in module properties not permitted",
        IncorrectAttributeActivePassive = 0xD218 => "Incorrect attribute (active/passive)",
        IncorrectBlockLength = 0xD219 => "Incorrect block lengths (for example, incorrect length of first section or of whole block)",
        IncorrectLocalDataLengthOrWriteProtect = 0xD21A => "Incorrect local data length or write-protection code faulty",
        ModuleCannotCompressOrCompressionInterrupted = 0xD21B => "Module cannot compress or compression was interrupted early",
        IllegalDynamicProjectDataSize = 0xD21D => "The volume of dynamic project data transferred is illegal",
        CannotAssignParametersToModule = 0xD21E => "Unable to assign parameters to a module (such as FM, CP). The system data could not be linked",
        InvalidProgrammingLanguage = 0xD220 => "Invalid programming language. Note the restrictions on the module being used",
        InvalidConnectionOrRoutingSystemData = 0xD221 => "The system data for connections or routing are not valid",
        InvalidGlobalDataSystemParams = 0xD222 => "The system data of the global data definition contain invalid parameters",
        CommFBInstanceDbErrorOrTooManyBackgroundDb = 0xD223 => "Error in instance data block for communication function block or maximum number of instance DBs exceeded",
        ScanSDBInvalidParams = 0xD224 => "The SCAN system data block contains invalid parameters",
        DpSDBInvalidParams = 0xD225 => "The DP system data block contains invalid parameters",
        StructuralErrorInBlock = 0xD226 => "A structural error occurred in a block",
        StructuralErrorInBlock2 = 0xD230 => "A structural error occurred in a block",
        OBPriorityMissingOnCopy = 0xD231 => "At least one loaded OB cannot be copied because the associated priority class does not exist",
        IllegalBlockNumberInLoadedBlock = 0xD232 => "At least one block number of a loaded block is illegal",
        BlockExistsTwice = 0xD234 => "Block exists twice in the specified memory medium or in the job",
        BlockChecksumIncorrect = 0xD235 => "The block contains an incorrect checksum",
        BlockNoChecksum = 0xD236 => "The block does not contain a checksum",
        BlockAlreadyLoadedSameTimestamp = 0xD237 => "A block with the same time stamp already exists on the CPU",
        SpecifiedBlockNotDB = 0xD238 => "At least one of the blocks specified is not a DB",
        SpecifiedDBNotAvailableAsLinkVar = 0xD239 => "At least one of the DBs specified is not available as a linked variant in the load memory",
        SpecifiedDBDiffersTooMuch = 0xD23A => "At least one of the specified DBs is considerably different from the copied and linked variant",
        CoordinationRulesViolated = 0xD240 => "Coordination rules violated",
        FunctionNotAllowedAtCurrentProtectionLevel = 0xD241 => "The function is not permitted in the current protection level",
        ProtectionConflictInFBlock = 0xD242 => "Protection violation while processing F blocks",
        UpdateAndModuleIdOrVersionMismatch = 0xD250 => "Update and module ID or version do not match",
        OSComponentsSequenceIncorrect = 0xD251 => "Incorrect sequence of operating system components",
        ChecksumError = 0xD252 => "Checksum error",
        NoExecutableLoaderAvailable = 0xD253 => "No executable loader available; update only possible using a memory card",
        StorageErrorInOS = 0xD254 => "Storage error in operating system",
        CompileErrorOnS7300 = 0xD280 => "Error compiling block in S7-300 CPU",
        AnotherBlockFunctionOrTriggerActive = 0xD2A1 => "Another block function or a trigger on a block is active",
        TriggerActiveFinishDebugFirst = 0xD2A2 => "A trigger is active on a block. Complete the debugging function first",
        BlockNotActivatedOrBusyOrMarkedForDelete = 0xD2A3 => "The block is not active (linked), the block is occupied or the block is currently marked for deletion",
        BlockProcessedByAnotherFunction = 0xD2A4 => "The block is already being processed by another block function",
        CannotSaveAndChangeProgramSimultaneously = 0xD2A6 => "It is not possible to save and change the user program simultaneously",
        BlockUnlinkedOrNotProcessed = 0xD2A7 => "The block has the attribute 'unlinked' or is not processed",
        ActiveDebugPreventsCpuParameterAssignment = 0xD2A8 => "An active debugging function is preventing parameters from being assigned to the CPU",
        AssigningNewParamsToCpu = 0xD2A9 => "New parameters are being assigned to the CPU",
        AssigningNewParamsToModule = 0xD2AA => "New parameters are currently being assigned to the modules",
        ChangingDynamicConfigLimits = 0xD2AB => "The dynamic configuration limits are currently being changed",
        SFC12ActivationBlocksRKiR = 0xD2AC => "A running activation or deactivation assignment (SFC 12) is temporarily preventing R-KiR process",
        ErrorConfiguringInRunCiR = 0xD2B0 => "An error occurred while configuring in RUN (CiR)",
        MaxProcessObjectsExceeded = 0xD2C0 => "The maximum number of technological objects has been exceeded",
        SameTechnologyDbExists = 0xD2C1 => "The same technology data block already exists on the module",
        CannotDownloadUserProgramOrHardwareConfig = 0xD2C2 => "Downloading the user program or downloading the hardware configuration is not possible",
        InfoFunctionNotAvailable = 0xD401 => "Information function unavailable",
        InfoFunctionNotAvailable2 = 0xD402 => "Information function unavailable",
        ServiceLoggedInOut = 0xD403 => "Service has already been logged on/off (Diagnostics/PMC)",
        MaxNodesReached = 0xD404 => "Maximum number of nodes reached. No more logons possible for diagnostics/PMC",
        ServiceNotSupportedOrSyntaxErrorInParams = 0xD405 => "Service not supported or syntax error in function parameters",
        RequiredInfoCurrentlyUnavailable = 0xD406 => "Required information currently unavailable",
        DiagnosticErrorOccurred = 0xD407 => "Diagnostics error occurred",
        UpdateAborted = 0xD408 => "Update aborted",
        DPBusError = 0xD409 => "Error on DP bus",
        SyntaxErrorInFunctionParamsD601 = 0xD601 => "Syntax error in function parameter",
        IncorrectPassword = 0xD602 => "Incorrect password entered",
        ConnectionLegalized = 0xD603 => "The connection has already been legitimized",
        ConnectionEnabled = 0xD604 => "The connection has already been enabled",
        LegalizationNotPossiblePasswordMissing = 0xD605 => "Legitimization not possible because password does not exist",
        AtLeastOneTagAddressInvalid = 0xD801 => "At least one tag address is invalid",
        SpecifiedJobDoesNotExist = 0xD802 => "Specified job does not exist",
        IllegalOperatingState = 0xD803 => "Illegal job status",
        IllegalCycleTime = 0xD804 => "Illegal cycle time (illegal time base or multiple)",
        NoMoreCyclicReadJobs = 0xD805 => "No more cyclic read jobs can be set up",
        ReferencedJobInWrongState = 0xD806 => "The referenced job is in a state in which the requested function cannot be performed",
        FunctionAbortedDueToOverload = 0xD807 => "Function aborted due to overload, meaning executing the read cycle takes longer than the set scan cycle time",
        InvalidDateOrTime = 0xDC01 => "Date and/or time invalid",
        CpuAlreadyMaster = 0xE201 => "CPU is already the master",
        CannotConnectUpdateDueToDifferentUserProgram = 0xE202 => "Connect and update not possible due to different user program in flash module",
        CannotConnectUpdateDueToDifferentFirmware = 0xE203 => "Connect and update not possible due to different firmware",
        CannotConnectUpdateDueToDifferentMemoryConfig = 0xE204 => "Connect and update not possible due to different memory configuration",
        CannotConnectUpdateDueToSynchronization = 0xE205 => "Connect/update aborted due to synchronization error",
        CannotConnectUpdateDueToCoordinationViolation = 0xE206 => "Connect/update denied due to coordination violation",
        ErrorAtId2Only00HPermittedInJob = 0xEF01 => "S7 protocol error: Error at ID2; only 00H permitted in job",
        ErrorAtId2SetOfResourcesDoesNotExist = 0xEF02 => "S7 protocol error: Error at ID2; set of resources does not exist",
    }
}

impl ErrorCode {
    /// Combine the two header bytes into the shared code table.
    #[inline]
    pub fn from_class_code(class: u8, code: u8) -> Self {
        ErrorCode::from(u16::from_be_bytes([class, code]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_lookup() {
        assert_eq!(ErrorCode::from(0x0000), ErrorCode::NoError);
        assert_eq!(
            ErrorCode::from_class_code(0x81, 0x04),
            ErrorCode::ServiceNotImplementedOrFrameError
        );
        assert_eq!(ErrorCode::from(0xD602).name(), "Incorrect password entered");
        let unknown = ErrorCode::from(0x1234);
        assert!(!unknown.is_known());
        assert_eq!(unknown.code(), 0x1234);
        assert_eq!(unknown.to_string(), "Unknown (0x1234)");
    }

    #[test]
    fn test_error_class_display() {
        assert_eq!(ErrorClass::from(0x85).to_string(), "Error on supplies");
        assert_eq!(ErrorClass::from(0x86), ErrorClass::Unknown(0x86));
    }

    #[test]
    fn test_decode_error_serializes_with_kind_tag() {
        let err = DecodeError::Truncated {
            offset: 12,
            needed: 1,
            available: 0,
        };
        assert!(err.is_truncated());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "truncated");
        assert_eq!(json["offset"], 12);
        assert_eq!(
            DecodeError::unknown("syntax id", 0x42u8).to_string(),
            "unknown syntax id 0x42"
        );
    }
}
