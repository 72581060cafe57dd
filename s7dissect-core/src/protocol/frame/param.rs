use super::super::{
    cursor::{Cursor, Opaque, Raw},
    error::{DecodeError, Result},
};
use super::{
    block::BlockControl,
    data::{decode_return_codes, decode_values, DataValue, FillRule},
    item::{decode_items, Item},
    pi::PiService,
    types::{Function, ReturnCode, Rosctr},
};
use serde::Serialize;
use tracing::{debug, trace};

/// Setup communication negotiation, same layout in both directions.
///
/// Fields after a cut stay `None`; `rest` holds what was not reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupCommunication {
    pub reserved: Option<u8>,
    pub max_amq_calling: Option<u16>,
    pub max_amq_called: Option<u16>,
    pub pdu_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<Opaque>,
}

impl SetupCommunication {
    fn decode(cur: &mut Cursor<'_>) -> Self {
        let mut out = Self {
            reserved: None,
            max_amq_calling: None,
            max_amq_called: None,
            pdu_length: None,
            rest: None,
        };
        if let Err(e) = out.fill(cur) {
            debug!(error = %e, "setup communication parameters cut short");
            out.rest = Some(cur.remainder(e));
        }
        out
    }

    fn fill(&mut self, cur: &mut Cursor<'_>) -> Result<()> {
        self.reserved = Some(cur.read_u8()?);
        self.max_amq_calling = Some(cur.read_u16()?);
        self.max_amq_called = Some(cur.read_u16()?);
        self.pdu_length = Some(cur.read_u16()?);
        Ok(())
    }
}

/// Data section of a ReadVar/WriteVar exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarPayload {
    None,
    /// Read results or values to write
    Values(Vec<Result<DataValue>>),
    /// Write confirmations
    WriteResults(Vec<Result<ReturnCode>>),
}

/// ReadVar/WriteVar parameters and their data section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarAccess {
    pub item_count: u8,
    /// Request items; responses carry only the count
    pub items: Vec<Result<Item>>,
    pub payload: VarPayload,
}

impl VarAccess {
    fn decode(
        function: Function,
        rosctr: Rosctr,
        param: &mut Cursor<'_>,
        data: &mut Cursor<'_>,
    ) -> Result<Self> {
        let item_count = param.read_u8()?;
        let count = item_count as usize;
        let items = match rosctr {
            Rosctr::Job => decode_items(param, count, false),
            _ => Vec::new(),
        };
        let payload = match (rosctr, function) {
            (Rosctr::Job, Function::WriteVar) | (Rosctr::AckData, Function::ReadVar) => {
                VarPayload::Values(decode_values(data, count, FillRule::ExceptLast))
            }
            (Rosctr::AckData, Function::WriteVar) => {
                VarPayload::WriteResults(decode_return_codes(data, count))
            }
            _ => VarPayload::None,
        };
        Ok(Self {
            item_count,
            items,
            payload,
        })
    }
}

/// PLC stop job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlcStop {
    pub unknown: Option<Raw>,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<Opaque>,
}

impl PlcStop {
    pub const UNKNOWN_LEN: usize = 5;

    fn decode(cur: &mut Cursor<'_>) -> Self {
        let mut out = Self {
            unknown: None,
            name: None,
            rest: None,
        };
        if let Err(e) = out.fill(cur) {
            debug!(error = %e, "PLC stop parameters cut short");
            out.rest = Some(cur.remainder(e));
        }
        out
    }

    fn fill(&mut self, cur: &mut Cursor<'_>) -> Result<()> {
        self.unknown = Some(cur.raw(Self::UNKNOWN_LEN)?);
        self.name = Some(cur.read_prefixed_ascii()?);
        Ok(())
    }
}

/// Parameter block of a Job or AckData PDU, selected by its function code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterBlock {
    SetupCommunication(SetupCommunication),
    ReadVar(VarAccess),
    WriteVar(VarAccess),
    Block(BlockControl),
    PiService(PiService),
    PlcStop(PlcStop),
    /// Function without a decoded layout in this direction
    Other {
        function: Function,
        #[serde(skip_serializing_if = "Option::is_none")]
        param: Option<Opaque>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Opaque>,
    },
}

impl ParameterBlock {
    pub fn function(&self) -> Function {
        match self {
            ParameterBlock::SetupCommunication(_) => Function::SetupCommunication,
            ParameterBlock::ReadVar(_) => Function::ReadVar,
            ParameterBlock::WriteVar(_) => Function::WriteVar,
            ParameterBlock::Block(b) => b.function,
            ParameterBlock::PiService(_) => Function::PiService,
            ParameterBlock::PlcStop(_) => Function::PlcStop,
            ParameterBlock::Other { function, .. } => *function,
        }
    }
}

/// Decode the parameter block of a Job or AckData PDU.
///
/// `param` and `data` are the two sections of the PDU. Only a missing
/// function byte fails; a layout cut short keeps the fields read before the
/// cut and reports the remainder as opaque.
pub fn decode_params(
    rosctr: Rosctr,
    param: &mut Cursor<'_>,
    data: &mut Cursor<'_>,
) -> Result<ParameterBlock> {
    let param_len = param.window_len();
    let function = Function::from(param.read_u8()?);
    let block = match (function, rosctr) {
        (Function::SetupCommunication, _) => {
            ParameterBlock::SetupCommunication(SetupCommunication::decode(param))
        }
        (Function::ReadVar | Function::WriteVar, _) => {
            match VarAccess::decode(function, rosctr, param, data) {
                Ok(va) if function == Function::ReadVar => ParameterBlock::ReadVar(va),
                Ok(va) => ParameterBlock::WriteVar(va),
                Err(e) => {
                    debug!(%function, error = %e, "item count missing");
                    ParameterBlock::Other {
                        function,
                        param: Some(param.remainder(e.clone())),
                        data: data.opaque_rest(e),
                    }
                }
            }
        }
        (f, _) if f.is_block_transfer() => {
            ParameterBlock::Block(BlockControl::decode(function, rosctr, param_len, param, data))
        }
        (Function::PiService, Rosctr::Job) => ParameterBlock::PiService(PiService::decode(param)),
        (Function::PlcStop, Rosctr::Job) => ParameterBlock::PlcStop(PlcStop::decode(param)),
        _ => {
            trace!(%function, %rosctr, "no parameter layout");
            let reason = DecodeError::unknown("function", function.code());
            ParameterBlock::Other {
                function,
                param: param.opaque_rest(reason.clone()),
                data: data.opaque_rest(reason),
            }
        }
    };
    Ok(block)
}
