//! Names of SZL partial lists and of the indices some lists are keyed by.

/// Name of the partial list `id`, by its list number
pub fn szl_list_name(id: u16) -> Option<&'static str> {
    let name = match id & 0x00FF {
        0x00 => "List of all the SZL-IDs of a module",
        0x11 => "Module identification",
        0x12 => "CPU characteristics",
        0x13 => "User memory areas",
        0x14 => "System areas",
        0x15 => "Block types",
        0x17 => "Stored blocks",
        0x18 => "Status of all LEDs",
        0x19 => "Status of the module LEDs",
        0x1C => "Component identification",
        0x21 => "Interrupt / error assignment",
        0x22 => "Interrupt status",
        0x23 => "Priority classes",
        0x24 => "Modes",
        0x25 => "Assignment between process image partitions and OBs",
        0x31 => "Communication capability parameters",
        0x32 => "Communication status data",
        0x33 => "Diagnostics: device logon list",
        0x37 => "Ethernet details of the module",
        0x71 => "H CPU group information",
        0x74 => "Status of the module LEDs",
        0x75 => "Switched DP slaves in the H-system",
        0x90 => "DP master system information",
        0x91 => "Module status information",
        0x92 => "Rack / station status information",
        0x94 => "Rack / station status information",
        0x95 => "Extended DP master system information",
        0x96 => "Module status information, PROFINET IO and PROFIBUS DP",
        0x9C => "Tool changer information (PROFINET IO)",
        0xA0 => "Diagnostic buffer of the CPU",
        0xB1 => "Module diagnostic information (data record 0)",
        0xB2 => "Module diagnostic information (data record 1), physical address",
        0xB3 => "Module diagnostic information (data record 1), logical address",
        0xB4 => "Diagnostic data of a DP slave",
        _ => return None,
    };
    Some(name)
}

/// Name of `index` within the partial list `id`, for the lists keyed by a
/// meaningful index
pub fn szl_index_name(id: u16, index: u16) -> Option<&'static str> {
    match id & 0x0FFF {
        0x0111 => module_identification_index(index),
        0x0112 => match index {
            0x0000 => Some("MC7 processing unit"),
            0x0100 => Some("Time system"),
            0x0200 => Some("System response"),
            0x0300 => Some("Language description of the CPU"),
            _ => None,
        },
        0x0113 => match index {
            0x0001 => Some("Work memory"),
            0x0002 => Some("Load memory integrated"),
            0x0003 => Some("Load memory plugged in"),
            0x0004 => Some("Maximum plug-in load memory"),
            0x0005 => Some("Size of the backup memory"),
            0x0006 => Some("Size of the memory reserved by the system for CFBs"),
            _ => None,
        },
        0x0114 => system_area_name(index),
        0x0115 => block_type_name(index),
        0x0119 | 0x0174 => led_name(index),
        0x011C => component_index_name(index),
        0x0131 => match index {
            0x0001 => Some("General communication data"),
            0x0002 => Some("Test and installation function constants"),
            0x0003 => Some("Operator interface constants"),
            0x0004 => Some("Object management system constants"),
            0x0005 => Some("Programmer command constants"),
            0x0006 => Some("Configured connection block types"),
            _ => None,
        },
        0x0132 => match index {
            0x0001 => Some("General communication status data"),
            0x0002 => Some("Test and installation status data"),
            0x0004 => Some("Protection level status data"),
            0x0005 => Some("Diagnostics status data"),
            0x0008 => Some("Time system status data"),
            0x000B => Some("Time system status data (extended)"),
            _ => None,
        },
        0x0424 => match index {
            0x0000 => Some("Current mode transition"),
            _ => None,
        },
        _ => None,
    }
}

fn module_identification_index(index: u16) -> Option<&'static str> {
    match index {
        0x0001 => Some("Identification of the module"),
        0x0006 => Some("Identification of the basic hardware"),
        0x0007 => Some("Identification of the basic firmware"),
        0x0081 => Some("Identification of the firmware extension"),
        _ => None,
    }
}

/// System area of an xy14 record
pub fn system_area_name(index: u16) -> Option<&'static str> {
    let name = match index {
        0x0001 => "PII (number in bytes)",
        0x0002 => "PIQ (number in bytes)",
        0x0003 => "Memory (number in bytes)",
        0x0004 => "Timers (number)",
        0x0005 => "Counters (number)",
        0x0006 => "Number of bytes in the logical address area",
        0x0007 => "Local data (entire local data area of the CPU in bytes)",
        0x0008 => "Memory (number in bytes)",
        0x0009 => "Local data (entire local data area of the CPU in Kbytes)",
        _ => return None,
    };
    Some(name)
}

/// Block type of an xy15 record
pub fn block_type_name(index: u16) -> Option<&'static str> {
    let name = match index {
        0x0800 => "OB",
        0x0A00 => "DB",
        0x0B00 => "SDB",
        0x0C00 => "FC",
        0x0E00 => "FB",
        _ => return None,
    };
    Some(name)
}

/// LED of an xy19/xy74 record, by the low byte of its index
pub fn led_name(index: u16) -> Option<&'static str> {
    let name = match index & 0x00FF {
        0x01 => "SF (group error)",
        0x02 => "INTF (internal error)",
        0x03 => "EXTF (external error)",
        0x04 => "RUN",
        0x05 => "STOP",
        0x06 => "FRCE (force)",
        0x07 => "CRST (cold restart)",
        0x08 => "BAF (battery fault/overload, short circuit of battery voltage on bus)",
        0x09 => "USR (user-defined)",
        0x0A => "USR1 (user-defined)",
        0x0B => "BUS1F (bus error interface 1)",
        0x0C => "BUS2F (bus error interface 2)",
        0x0D => "REDF (redundancy error)",
        0x0E => "MSTR (master)",
        0x0F => "RACK0 (rack number 0)",
        0x10 => "RACK1 (rack number 1)",
        0x11 => "RACK2 (rack number 2)",
        0x12 => "IFM1F (interface error interface module 1)",
        0x13 => "IFM2F (interface error interface module 2)",
        0x14 => "BUS3F (bus error interface 3)",
        0x15 => "MAINT (maintenance demand)",
        0x16 => "DC24V",
        0x80 => "IF (init failure)",
        0x81 => "UF (user failure)",
        0x82 => "MF (monitoring failure)",
        0x83 => "CF (communication failure)",
        0x84 => "TF (task failure)",
        0xEC => "APPL_STATE_RED",
        0xED => "APPL_STATE_GREEN",
        _ => return None,
    };
    Some(name)
}

/// Identification item of an xy1C record
pub fn component_index_name(index: u16) -> Option<&'static str> {
    let name = match index {
        0x0001 => "Name of the automation system",
        0x0002 => "Name of the module",
        0x0003 => "Plant designation of the module",
        0x0004 => "Copyright entry",
        0x0005 => "Serial number of the module",
        0x0007 => "Module type name",
        0x0008 => "Serial number of the memory card",
        0x0009 => "Manufacturer and profile of a CPU module",
        0x000A => "OEM ID of a module",
        0x000B => "Location designation of a module",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_names_ignore_class_and_extract() {
        assert_eq!(szl_list_name(0x0011), Some("Module identification"));
        assert_eq!(szl_list_name(0x0F11), Some("Module identification"));
        assert_eq!(szl_list_name(0x00A0), Some("Diagnostic buffer of the CPU"));
        assert_eq!(szl_list_name(0x00EE), None);
    }

    #[test]
    fn test_index_names() {
        assert_eq!(
            szl_index_name(0x0131, 0x0001),
            Some("General communication data")
        );
        assert_eq!(szl_index_name(0x0174, 0x0004), Some("RUN"));
        assert_eq!(szl_index_name(0x0115, 0x0A00), Some("DB"));
        assert_eq!(szl_index_name(0x0131, 0x0042), None);
        assert_eq!(szl_index_name(0x0A0A, 0x0001), None);
    }
}
