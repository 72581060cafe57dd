wire_enum! {
    /// ROSCTR: top-level PDU kind
    pub enum Rosctr: u8 {
        Job = 0x01 => "Job",
        Ack = 0x02 => "Ack",
        AckData = 0x03 => "Ack_Data",
        Userdata = 0x07 => "Userdata",
    }
}

impl Rosctr {
    /// Whether the header carries the error class/code pair.
    #[inline]
    pub fn has_error_fields(self) -> bool {
        matches!(self, Rosctr::Ack | Rosctr::AckData)
    }
}

wire_enum! {
    /// S7 function codes of Job/AckData parameter blocks
    pub enum Function: u8 {
        CpuServices = 0x00 => "CPU services",
        SetupCommunication = 0xF0 => "Setup communication",
        ReadVar = 0x04 => "Read Var",
        WriteVar = 0x05 => "Write Var",
        RequestDownload = 0x1A => "Request download",
        DownloadBlock = 0x1B => "Download block",
        DownloadEnded = 0x1C => "Download ended",
        StartUpload = 0x1D => "Start upload",
        Upload = 0x1E => "Upload",
        EndUpload = 0x1F => "End upload",
        PiService = 0x28 => "PI-Service",
        PlcStop = 0x29 => "PLC Stop",
    }
}

impl Function {
    /// Block up/download control functions 0x1A..=0x1F
    #[inline]
    pub fn is_block_transfer(self) -> bool {
        (0x1A..=0x1F).contains(&self.code())
    }
}

wire_enum! {
    /// Syntax identifier of a variable specification
    pub enum SyntaxId: u8 {
        S7Any = 0x10 => "S7ANY",
        PbcRid = 0x13 => "PBC-R_ID",
        AlarmLockFreeSet = 0x15 => "ALARM_LOCKFREE",
        AlarmIndSet = 0x16 => "ALARM_IND",
        AlarmAckSet = 0x19 => "ALARM_ACK",
        AlarmQueryReqSet = 0x1A => "ALARM_QUERYREQ",
        NotifyIndSet = 0x1C => "NOTIFY_IND",
        Nck = 0x82 => "NCK",
        NckMetric = 0x83 => "NCK_METRIC",
        NckInch = 0x84 => "NCK_INCH",
        DriveEsAny = 0xA2 => "DRIVEESANY",
        DbRead = 0xB0 => "DBREAD",
        Tia1200Symbolic = 0xB2 => "1200SYM",
    }
}

wire_enum! {
    /// Memory area of an S7Any address
    pub enum Area: u8 {
        SysInfo = 0x03 => "System info of 200 family",
        SysFlags = 0x05 => "System flags of 200 family",
        AnalogIn = 0x06 => "Analog inputs of 200 family",
        AnalogOut = 0x07 => "Analog outputs of 200 family",
        Counter = 0x1C => "S7 counters (C)",
        Timer = 0x1D => "S7 timers (T)",
        IecCounter = 0x1E => "IEC counters (200 family)",
        IecTimer = 0x1F => "IEC timers (200 family)",
        Peripheral = 0x80 => "Direct peripheral access (P)",
        Inputs = 0x81 => "Inputs (I)",
        Outputs = 0x82 => "Outputs (Q)",
        Flags = 0x83 => "Flags (M)",
        DataBlock = 0x84 => "Data blocks (DB)",
        InstanceDb = 0x85 => "Instance data blocks (DI)",
        Local = 0x86 => "Local data (L)",
        Previous = 0x87 => "Unknown yet (V)",
    }
}

impl Area {
    /// Counter and timer areas address by number instead of byte.bit
    #[inline]
    pub fn is_numbered(self) -> bool {
        matches!(self, Area::Counter | Area::Timer)
    }
}

wire_enum! {
    /// Transport size of an S7Any item
    pub enum ItemTransportSize: u8 {
        Bit = 0x01 => "BIT",
        Byte = 0x02 => "BYTE",
        Char = 0x03 => "CHAR",
        Word = 0x04 => "WORD",
        Int = 0x05 => "INT",
        DWord = 0x06 => "DWORD",
        DInt = 0x07 => "DINT",
        Real = 0x08 => "REAL",
        Date = 0x09 => "DATE",
        TimeOfDay = 0x0A => "TOD",
        Time = 0x0B => "TIME",
        S5Time = 0x0C => "S5TIME",
        DateAndTime = 0x0F => "DATE_AND_TIME",
        Counter = 0x1C => "COUNTER",
        Timer = 0x1D => "TIMER",
        IecTimer = 0x1E => "IEC TIMER",
        IecCounter = 0x1F => "IEC COUNTER",
        HsCounter = 0x20 => "HS COUNTER",
    }
}

wire_enum! {
    /// Transport size of a data value
    pub enum DataTransportSize: u8 {
        Null = 0x00 => "NULL",
        Bit = 0x03 => "BIT",
        ByteWordDword = 0x04 => "BYTE/WORD/DWORD",
        Integer = 0x05 => "INTEGER",
        DInteger = 0x06 => "DINTEGER",
        Real = 0x07 => "REAL",
        OctetString = 0x09 => "OCTET STRING",
    }
}

impl DataTransportSize {
    /// Transport sizes whose length field counts bits
    #[inline]
    pub fn length_in_bits(self) -> bool {
        matches!(
            self,
            DataTransportSize::Bit | DataTransportSize::ByteWordDword | DataTransportSize::Integer
        )
    }

    /// Payload byte count for a declared `length`.
    #[inline]
    pub fn payload_len(self, length: u16) -> usize {
        let length = length as usize;
        if self.length_in_bits() {
            length.div_ceil(8)
        } else {
            length
        }
    }
}

wire_enum! {
    /// Return code of a data value or write confirmation
    pub enum ReturnCode: u8 {
        Reserved = 0x00 => "Reserved",
        HardwareFault = 0x01 => "Hardware error",
        AccessFault = 0x03 => "Accessing the object not allowed",
        OutOfRange = 0x05 => "Invalid address",
        NotSupported = 0x06 => "Data type not supported",
        SizeMismatch = 0x07 => "Data type inconsistent",
        ObjectError = 0x0A => "Object does not exist",
        Ok = 0xFF => "Success",
    }
}

impl ReturnCode {
    /// Codes followed by a transport size and length field
    #[inline]
    pub fn declares_length(self) -> bool {
        matches!(
            self,
            ReturnCode::Reserved | ReturnCode::Ok | ReturnCode::ObjectError
        )
    }

    /// Codes followed by payload bytes
    #[inline]
    pub fn carries_payload(self) -> bool {
        matches!(self, ReturnCode::Reserved | ReturnCode::Ok)
    }
}

wire_enum! {
    /// Block type, two ASCII hex digits on the wire
    pub enum BlockType: u16 {
        Ob = 0x3038 => "OB",
        CMod = 0x3039 => "CMod",
        Db = 0x3041 => "DB",
        Sdb = 0x3042 => "SDB",
        Fc = 0x3043 => "FC",
        Sfc = 0x3044 => "SFC",
        Fb = 0x3045 => "FB",
        Sfb = 0x3046 => "SFB",
    }
}

wire_enum! {
    /// First character of a block filename
    pub enum FileIdentifier: u8 {
        Complete = b'_' => "Complete Module",
        Header = b'$' => "Module header for up-loading",
    }
}

wire_enum! {
    /// Destination file system of a block filename
    pub enum Filesystem: u8 {
        Passive = b'P' => "Passive (copied, but not chained) module",
        Active = b'A' => "Active embedded module",
        Both = b'B' => "Active as well as passive module",
    }
}

wire_enum! {
    /// Programming language of a block
    pub enum BlockLanguage: u8 {
        NotDefined = 0x00 => "Not defined",
        Awl = 0x01 => "AWL",
        Kop = 0x02 => "KOP",
        Fup = 0x03 => "FUP",
        Scl = 0x04 => "SCL",
        Db = 0x05 => "DB",
        Graph = 0x06 => "GRAPH",
        Sdb = 0x07 => "SDB",
        CpuDb = 0x08 => "CPU-DB",
        SdbAfterReset = 0x11 => "SDB (after overall reset)",
        SdbRouting = 0x12 => "SDB (Routing)",
        Encrypt = 0x29 => "ENCRYPT",
    }
}

wire_enum! {
    /// Sub-block type carried in block info responses
    pub enum SubblockType: u8 {
        Ob = 0x08 => "OB",
        Db = 0x0A => "DB",
        Sdb = 0x0B => "SDB",
        Fc = 0x0C => "FC",
        Sfc = 0x0D => "SFC",
        Fb = 0x0E => "FB",
        Sfb = 0x0F => "SFB",
    }
}

wire_enum! {
    pub enum BlockSecurity: u32 {
        None = 0 => "None",
        KnowHowProtect = 3 => "Know How Protect",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_codes_round_trip() {
        let f = Function::from(0x42);
        assert_eq!(f, Function::Unknown(0x42));
        assert_eq!(u8::from(f), 0x42);
        assert_eq!(Function::from(0xF0), Function::SetupCommunication);
        assert_eq!(Function::SetupCommunication.to_string(), "Setup communication");
    }

    #[test]
    fn test_block_transfer_range() {
        assert!(Function::RequestDownload.is_block_transfer());
        assert!(Function::EndUpload.is_block_transfer());
        assert!(!Function::PiService.is_block_transfer());
    }

    #[test]
    fn test_payload_len_bits_vs_bytes() {
        assert_eq!(DataTransportSize::ByteWordDword.payload_len(16), 2);
        assert_eq!(DataTransportSize::Bit.payload_len(1), 1);
        assert_eq!(DataTransportSize::Integer.payload_len(17), 3);
        assert_eq!(DataTransportSize::OctetString.payload_len(17), 17);
        assert_eq!(DataTransportSize::Real.payload_len(4), 4);
    }

    #[test]
    fn test_ascii_keyed_tables() {
        assert_eq!(BlockType::from(u16::from_be_bytes(*b"0A")), BlockType::Db);
        assert_eq!(FileIdentifier::from(b'$'), FileIdentifier::Header);
        assert_eq!(Filesystem::from(b'B').name(), "Active as well as passive module");
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Rosctr::AckData).unwrap();
        assert_eq!(json, "\"Ack_Data\"");
        let json = serde_json::to_string(&Rosctr::from(5)).unwrap();
        assert_eq!(json, "\"Unknown (0x05)\"");
    }
}
