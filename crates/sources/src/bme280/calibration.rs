//! Factory trim values stored in the sensor's non-volatile registers.

/// Start of the temperature trim block (T1..T3, 6 bytes)
pub const TEMPERATURE_CALIB_REG: u8 = 0x88;
/// Start of the pressure trim block (P1..P9, 18 bytes)
pub const PRESSURE_CALIB_REG: u8 = 0x8E;
/// H1, a single byte
pub const HUMIDITY_H1_REG: u8 = 0xA1;
/// Start of the remaining humidity trim block (H2..H6, 7 bytes)
pub const HUMIDITY_CALIB_REG: u8 = 0xE1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calibration {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
    pub h1: u8,
    pub h2: i16,
    pub h3: u8,
    pub h4: i16,
    pub h5: i16,
    pub h6: i8,
}

fn le_u16(bytes: &[u8], i: usize) -> u16 {
    u16::from_le_bytes([bytes[i], bytes[i + 1]])
}

fn le_i16(bytes: &[u8], i: usize) -> i16 {
    i16::from_le_bytes([bytes[i], bytes[i + 1]])
}

impl Calibration {
    /// Decode the three register blocks plus H1.
    ///
    /// H4 and H5 share the nibbles of byte 4 of the humidity block; their
    /// high bytes are signed.
    pub fn from_registers(
        temperature: &[u8; 6],
        pressure: &[u8; 18],
        h1: u8,
        humidity: &[u8; 7],
    ) -> Self {
        let p = pressure;
        let h = humidity;
        Self {
            t1: le_u16(temperature, 0),
            t2: le_i16(temperature, 2),
            t3: le_i16(temperature, 4),
            p1: le_u16(p, 0),
            p2: le_i16(p, 2),
            p3: le_i16(p, 4),
            p4: le_i16(p, 6),
            p5: le_i16(p, 8),
            p6: le_i16(p, 10),
            p7: le_i16(p, 12),
            p8: le_i16(p, 14),
            p9: le_i16(p, 16),
            h1,
            h2: le_i16(h, 0),
            h3: h[2],
            h4: ((h[3] as i8 as i16) << 4) | (h[4] & 0x0F) as i16,
            h5: ((h[5] as i8 as i16) << 4) | (h[4] >> 4) as i16,
            h6: h[6] as i8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_datasheet_trim() {
        let cal = Calibration::from_registers(
            &[0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC],
            &[
                0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C, 0x00, 0xF9, 0xFF, 0x8C, 0x3C,
                0xF8, 0xC6, 0x70, 0x17,
            ],
            75,
            &[0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E],
        );
        assert_eq!((cal.t1, cal.t2, cal.t3), (27504, 26435, -1000));
        assert_eq!(
            [cal.p2, cal.p3, cal.p4, cal.p5, cal.p6, cal.p7, cal.p8, cal.p9],
            [-10685, 3024, 2855, 140, -7, 15500, -14600, 6000]
        );
        assert_eq!(cal.p1, 36477);
        assert_eq!((cal.h1, cal.h2, cal.h3), (75, 362, 0));
        assert_eq!((cal.h4, cal.h5, cal.h6), (313, 50, 30));
    }

    #[test]
    fn test_negative_h4_h5() {
        let cal = Calibration::from_registers(
            &[0; 6],
            &[0; 18],
            0,
            &[0x00, 0x00, 0x00, 0xFF, 0x5A, 0xFE, 0x80],
        );
        // 0xFF sign-extends to -1: (-1 << 4) | 0xA
        assert_eq!(cal.h4, -6);
        // 0xFE sign-extends to -2: (-2 << 4) | 0x5
        assert_eq!(cal.h5, -27);
        assert_eq!(cal.h6, -128);
    }
}
