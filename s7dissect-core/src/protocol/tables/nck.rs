/// Sinumerik NCK data module names, keyed by the module byte of an NCK address.
pub fn nck_module_name(module: u8) -> Option<&'static str> {
    let name = match module {
        0x10 => "Y - Global system data",
        0x11 => "YNCFL - NCK instruction groups",
        0x12 => "FU - NCU global settable frames",
        0x13 => "FA - Active NCU global frames",
        0x14 => "TO - Tool data",
        0x15 => "RP - Arithmetic parameters",
        0x16 => "SE - Setting data",
        0x17 => "SGUD - SGUD-Block",
        0x18 => "LUD - Local userdata",
        0x19 => "TC - Toolholder-parameters",
        0x1A => "M - Machine data",
        0x1C => "WAL - Working area limitation",
        0x1E => "DIAG - Internal diagnostic data",
        0x1F => "CC - Unknown",
        0x20 => "FE - Channel-specific external frame",
        0x21 => "TD - Tool data: General data",
        0x22 => "TS - Tool edge data: Monitoring data",
        0x23 => "TG - Tool data: Grinding-specific data",
        0x24 => "TU - Tool data",
        0x25 => "TUE - Tool edge data, userdefined data",
        0x26 => "TV - Tool data, directory",
        0x27 => "TM - Magazine data: General data",
        0x28 => "TP - Magazine data: Location data",
        0x29 => "TPM - Magazine data: Multiple assignment of location data",
        0x2A => "TT - Magazine data: Location typ",
        0x2B => "TMV - Magazine data: Directory",
        0x2C => "TMC - Magazine data: Configuration data",
        0x30 => "PA - Channel-specific protection zones",
        0x31 => "GD1 - SGUD-Block GD1",
        0x32 => "NIB - State data: Nibbling",
        0x33 => "ETP - Types of events",
        0x34 => "ETPD - Data lists for protocolling",
        0x35 => "SYNACT - Channel-specific synchronous actions",
        0x36 => "DIAGN - Diagnostic data",
        0x37 => "VSYN - Channel-specific user variables for synchronous actions",
        0x38 => "TUS - Tool data: user monitoring data",
        0x39 => "TUM - Tool data: user magazine data",
        0x3A => "TUP - Tool data: user magazine place data",
        0x3B => "TF - Parametrizing, return parameters of _N_TMGETT, _N_TSEARC",
        0x3C => "FB - Channel-specific base frames",
        0x3D => "SSP2 - State data: Spindle",
        0x3E => "PUD - Program-global user data",
        0x3F => "TOS - Edge-related location-dependent fine total offsets",
        0x40 => "TOST - Edge-related location-dependent fine total offsets, transformed",
        0x41 => "TOE - Edge-related coarse total offsets, setup offsets",
        0x42 => "TOET - Edge-related coarse total offsets, transformed setup offsets",
        0x43 => "AD - Adapter data",
        0x44 => "TOT - Edge data: Transformed offset data",
        0x45 => "AEV - Working offsets: Directory",
        0x46 => "YFAFL - NCK instruction groups (Fanuc)",
        0x47 => "FS - System-Frame",
        0x48 => "SD - Servo data",
        0x49 => "TAD - Application-specific data",
        0x4A => "TAO - Application-specific cutting edge data",
        0x4B => "TAS - Application-specific monitoring data",
        0x4C => "TAM - Application-specific magazine data",
        0x4D => "TAP - Application-specific magazine location data",
        0x4E => "MEM - Unknown",
        0x4F => "SALUC - Alarm actions: List in reverse chronological order",
        0x50 => "AUXFU - Auxiliary functions",
        0x51 => "TDC - Tool/Tools",
        0x52 => "CP - Generic coupling",
        0x6E => "SDME - Unknown",
        0x6F => "SPARPI - Program pointer on interruption",
        0x70 => "SEGA - State data: Geometry axes in tool offset memory (extended)",
        0x71 => "SEMA - State data: Machine axes (extended)",
        0x72 => "SSP - State data: Spindle",
        0x73 => "SGA - State data: Geometry axes in tool offset memory",
        0x74 => "SMA - State data: Machine axes",
        0x75 => "SALAL - Alarms: List organized according to time",
        0x76 => "SALAP - Alarms: List organized according to priority",
        0x77 => "SALA - Alarms: List organized according to time",
        0x78 => "SSYNAC - Synchronous actions",
        0x79 => "SPARPF - Program pointers for block search and stop run",
        0x7A => "SPARPP - Program pointer in automatic operation",
        0x7B => "SNCF - Active G functions",
        0x7D => "SPARP - Part program information",
        0x7E => "SINF - Part-program-specific status data",
        0x7F => "S - State data",
        _ => return None,
    };
    Some(name)
}
