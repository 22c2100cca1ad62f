//! AMS layer - network addressing ([`AmsNetId`], [`AmsAddr`]), the TCP frame
//! prefix ([`AmsTcpHeader`]) and the routed packet itself ([`AmsPacket`]).

pub mod addr;
pub mod error;
pub mod net_id;
pub mod packet;
pub mod tcp_header;

pub use addr::{AmsAddr, AmsPort};
pub use error::{AddrError, FrameError, NetIdError};
pub use net_id::{AmsNetId, NETID_LEN};
pub use packet::{AMS_PACKET_MAX_LEN, AmsPacket};
pub use tcp_header::AmsTcpHeader;
