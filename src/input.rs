use web_sys as web;

// ---------------- Event coordinate helpers ----------------
#[inline]
pub fn mouse_client(ev: &web::MouseEvent) -> (f64, f64) {
    (ev.client_x() as f64, ev.client_y() as f64)
}

/// Client position of the first active touch, if any.
#[inline]
pub fn first_touch_client(ev: &web::TouchEvent) -> Option<(f64, f64)> {
    let touch = ev.touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// `(gamma, beta)` in degrees; either may be missing on devices without a
/// gyroscope.
#[inline]
pub fn orientation_angles(ev: &web::DeviceOrientationEvent) -> (Option<f64>, Option<f64>) {
    (ev.gamma(), ev.beta())
}
