//! MAX31723 register map and configuration-register bit layout.
//!
//! The part exposes three addressable registers. A read frame clocks out
//! the bare register address followed by a filler byte whose response slot
//! carries the register value; a write frame sets bit 7 on the address
//! byte and follows it with the data byte. Only the low three address
//! bits are decoded by the part.

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// Configuration/status register (read/write).
pub const CONFIG: u8 = 0x00;

/// Temperature LSB: fractional degrees, upper nibble valid (read-only).
pub const TEMP_LSB: u8 = 0x01;

/// Temperature MSB: integer degrees (read-only).
pub const TEMP_MSB: u8 = 0x02;

// ---------------------------------------------------------------------------
// Frame layout
// ---------------------------------------------------------------------------

/// The part decodes only the low three address bits.
pub const ADDRESS_MASK: u8 = 0x07;

/// Set on the address byte to select a register write.
pub const WRITE_FLAG: u8 = 0x80;

/// Clocked out while the register value is clocked in during a read.
pub const READ_FILLER: u8 = 0xFF;

// ---------------------------------------------------------------------------
// Configuration register bits
// ---------------------------------------------------------------------------

/// SD: stop continuous conversions. Must be set for oneshot operation.
pub const CFG_SHUTDOWN: u8 = 1 << 0;

/// R1:R0 resolution field, shifted into bits 2:1.
pub const CFG_RESOLUTION_SHIFT: u8 = 1;

/// Width mask of the resolution field, applied before shifting.
pub const CFG_RESOLUTION_MASK: u8 = 0x3;

/// Thermostat output mode select, bit 3.
pub const CFG_THERMOSTAT_SHIFT: u8 = 3;

/// Width mask of the thermostat mode field, applied before shifting.
pub const CFG_THERMOSTAT_MASK: u8 = 0x1;

/// 1SHOT: with SD set, writing 1 triggers a single conversion. The part
/// clears the bit itself once the conversion completes.
pub const CFG_ONESHOT: u8 = 1 << 4;
