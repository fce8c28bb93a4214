//! Datasheet fixed-point compensation.
//!
//! Pure functions over [`Calibration`] and [`RawSample`]. Every intermediate
//! is computed in a wider integer than the datasheet's so no register value
//! can overflow.

use super::calibration::Calibration;

/// First of the 8 measurement registers (press, temp, hum)
pub const DATA_REG: u8 = 0xF7;

/// Uncompensated ADC readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub adc_t: i32,
    pub adc_p: i32,
    pub adc_h: i32,
}

impl RawSample {
    /// Decode the burst read at 0xF7. Pressure and temperature are 20 bits,
    /// humidity is 16.
    pub fn from_registers(data: &[u8; 8]) -> Self {
        let twenty = |msb: u8, lsb: u8, xlsb: u8| {
            ((msb as i32) << 12) | ((lsb as i32) << 4) | ((xlsb as i32) >> 4)
        };
        Self {
            adc_p: twenty(data[0], data[1], data[2]),
            adc_t: twenty(data[3], data[4], data[5]),
            adc_h: ((data[6] as i32) << 8) | data[7] as i32,
        }
    }
}

/// Compensated reading in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub celsius: f64,
    pub pascals: f64,
    /// Relative humidity, 0..=100
    pub humidity: f64,
}

/// Returns `(t_fine, temperature in 0.01 degC)`
pub fn compensate_temperature(cal: &Calibration, adc_t: i32) -> (i32, i32) {
    let adc_t = adc_t as i64;
    let t1 = cal.t1 as i64;
    let var1 = (((adc_t >> 3) - (t1 << 1)) * cal.t2 as i64) >> 11;
    let var2 = ((((adc_t >> 4) - t1) * ((adc_t >> 4) - t1)) >> 12) * cal.t3 as i64 >> 14;
    let t_fine = var1 + var2;
    (t_fine as i32, ((t_fine * 5 + 128) >> 8) as i32)
}

/// Pressure in Pa as unsigned Q24.8. Zero when the trim would divide by
/// zero.
pub fn compensate_pressure(cal: &Calibration, adc_p: i32, t_fine: i32) -> u32 {
    let mut var1 = t_fine as i128 - 128000;
    let mut var2 = var1 * var1 * cal.p6 as i128;
    var2 += (var1 * cal.p5 as i128) << 17;
    var2 += (cal.p4 as i128) << 35;
    var1 = ((var1 * var1 * cal.p3 as i128) >> 8) + ((var1 * cal.p2 as i128) << 12);
    var1 = (((1i128 << 47) + var1) * cal.p1 as i128) >> 33;
    if var1 == 0 {
        return 0;
    }

    let mut p = 1048576 - adc_p as i128;
    // Truncating division, as in C
    p = (((p << 31) - var2) * 3125) / var1;
    var1 = (cal.p9 as i128 * (p >> 13) * (p >> 13)) >> 25;
    var2 = (cal.p8 as i128 * p) >> 19;
    p = ((p + var1 + var2) >> 8) + ((cal.p7 as i128) << 4);
    p.clamp(0, u32::MAX as i128) as u32
}

/// Relative humidity as unsigned Q22.10, clamped to 0..=100 %
pub fn compensate_humidity(cal: &Calibration, adc_h: i32, t_fine: i32) -> u32 {
    let adc_h = adc_h as i64;
    let v = t_fine as i64 - 76800;

    let scaled = (((adc_h << 14) - ((cal.h4 as i64) << 20) - (cal.h5 as i64 * v)) + 16384) >> 15;
    let trim = (((((v * cal.h6 as i64) >> 10) * (((v * cal.h3 as i64) >> 11) + 32768)) >> 10)
        + 2097152)
        * cal.h2 as i64
        + 8192;
    let mut v = scaled * (trim >> 14);
    v -= (((v >> 15) * (v >> 15)) >> 7) * cal.h1 as i64 >> 4;
    let v = v.clamp(0, 419430400);
    (v >> 12) as u32
}

/// Compensate all three channels
pub fn compensate(cal: &Calibration, raw: &RawSample) -> Measurement {
    let (t_fine, centi) = compensate_temperature(cal, raw.adc_t);
    let pressure = compensate_pressure(cal, raw.adc_p, t_fine);
    let humidity = compensate_humidity(cal, raw.adc_h, t_fine);
    Measurement {
        celsius: centi as f64 / 100.0,
        pascals: pressure as f64 / 256.0,
        humidity: humidity as f64 / 1024.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datasheet() -> Calibration {
        Calibration {
            t1: 27504,
            t2: 26435,
            t3: -1000,
            p1: 36477,
            p2: -10685,
            p3: 3024,
            p4: 2855,
            p5: 140,
            p6: -7,
            p7: 15500,
            p8: -14600,
            p9: 6000,
            h1: 75,
            h2: 362,
            h3: 0,
            h4: 313,
            h5: 50,
            h6: 30,
        }
    }

    #[test]
    fn test_temperature_reference_value() {
        let (t_fine, centi) = compensate_temperature(&datasheet(), 519888);
        assert_eq!(t_fine, 128422);
        assert_eq!(centi, 2508);
    }

    #[test]
    fn test_pressure_reference_value() {
        let p = compensate_pressure(&datasheet(), 415148, 128422);
        assert_eq!(p, 25767233);
        assert_eq!(p / 256, 100653);
    }

    #[test]
    fn test_pressure_zero_p1_does_not_divide() {
        let cal = Calibration {
            p1: 0,
            ..datasheet()
        };
        assert_eq!(compensate_pressure(&cal, 415148, 128422), 0);
    }

    #[test]
    fn test_humidity_values_and_clamping() {
        let cal = datasheet();
        assert_eq!(compensate_humidity(&cal, 30000, 128422), 56317);
        assert_eq!(compensate_humidity(&cal, 0, 128422), 0);
        assert_eq!(compensate_humidity(&cal, 20000, 128422), 0);
        assert_eq!(compensate_humidity(&cal, 65535, 128422), 102400);
    }

    #[test]
    fn test_extreme_registers_do_not_overflow() {
        let cal = Calibration {
            t2: i16::MAX,
            t3: i16::MIN,
            p6: i16::MIN,
            p9: i16::MAX,
            h2: i16::MAX,
            h5: i16::MIN,
            ..datasheet()
        };
        for raw in [0, 0xFFFFF] {
            let (t_fine, _) = compensate_temperature(&cal, raw);
            compensate_pressure(&cal, raw, t_fine);
            assert!(compensate_humidity(&cal, raw & 0xFFFF, t_fine) <= 102400);
        }
    }

    #[test]
    fn test_raw_sample_decoding() {
        let raw = RawSample::from_registers(&[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x30]);
        assert_eq!(raw.adc_p, 415148);
        assert_eq!(raw.adc_t, 519888);
        assert_eq!(raw.adc_h, 30000);

        let m = compensate(&datasheet(), &raw);
        assert!((m.celsius - 25.08).abs() < 1e-9);
        assert!((m.pascals - 100653.25390625).abs() < 1e-6);
        assert_eq!(format!("{:.1}", m.humidity), "55.0");
    }
}
