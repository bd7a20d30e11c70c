use nalgebra_glm::Vec4;

pub fn deg_to_rad(deg: f32) -> f32 {
    deg / (180.0 / std::f32::consts::PI)
}

pub fn blend(a: &Vec4, b: &Vec4, t: f32) -> Vec4 {
    a * (1.0 - t) + b * t
}

pub fn scale_rgb(color: &Vec4, factor: f32) -> Vec4 {
    Vec4::new(color.x * factor, color.y * factor, color.z * factor, color.w)
}

/// Wraps a value into `[0, 1)`.
pub fn wrap_unit(value: f32) -> f32 {
    let wrapped = value.rem_euclid(1.0);

    // rem_euclid may round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_glm::vec4;

    #[test]
    fn blend_endpoints_are_exact() {
        let a = vec4(0.8, 0.6, 0.4, 1.0);
        let b = vec4(1.0, 1.0, 1.0, 1.0);

        assert_eq!(blend(&a, &b, 0.0), a);
        assert_eq!(blend(&a, &b, 1.0), b);
    }

    #[test]
    fn blend_midpoint() {
        let mid = blend(&vec4(0.0, 0.0, 0.0, 0.0), &vec4(1.0, 0.5, 0.25, 1.0), 0.5);
        assert!((mid - vec4(0.5, 0.25, 0.125, 0.5)).norm() < 1e-6);
    }

    #[test]
    fn scale_rgb_keeps_alpha() {
        let scaled = scale_rgb(&vec4(1.0, 0.5, 0.2, 1.0), 0.5);
        assert_eq!(scaled, vec4(0.5, 0.25, 0.1, 1.0));
    }

    #[test]
    fn wrap_unit_range() {
        assert_eq!(wrap_unit(0.0), 0.0);
        assert_eq!(wrap_unit(1.0), 0.0);
        assert!((wrap_unit(1.25) - 0.25).abs() < 1e-6);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
        assert!(wrap_unit(-1e-9) < 1.0);
    }

    #[test]
    fn degrees_to_radians() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((deg_to_rad(-90.0) + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
