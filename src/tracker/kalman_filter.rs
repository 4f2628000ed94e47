//! Constant-velocity Kalman filter over a box in XYAH space, on nalgebra fixed-size matrices.

use nalgebra::{SMatrix, SVector};

pub type StateVector = SVector<f64, 8>;
pub type StateCovariance = SMatrix<f64, 8, 8>;
pub type Measurement = SVector<f64, 4>;

/// Box state: centre x/y, aspect ratio, height and their velocities.
#[derive(Debug, Clone, PartialEq)]
pub struct KalmanState {
    pub mean: StateVector,
    pub covariance: StateCovariance,
}

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    motion_mat: StateCovariance,
    update_mat: SMatrix<f64, 4, 8>,
    std_weight_position: f64,
    std_weight_velocity: f64,
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl KalmanFilter {
    pub fn new() -> Self {
        let mut motion_mat = StateCovariance::identity();
        for i in 0..4 {
            motion_mat[(i, 4 + i)] = 1.0;
        }

        let mut update_mat = SMatrix::<f64, 4, 8>::zeros();
        for i in 0..4 {
            update_mat[(i, i)] = 1.0;
        }

        Self {
            motion_mat,
            update_mat,
            std_weight_position: 1.0 / 20.0,
            std_weight_velocity: 1.0 / 160.0,
        }
    }

    pub fn initiate(&self, xyah: [f32; 4]) -> KalmanState {
        let mut mean = StateVector::zeros();
        for (i, v) in xyah.iter().enumerate() {
            mean[i] = f64::from(*v);
        }

        let h = mean[3];
        let pos = 2.0 * self.std_weight_position * h;
        let vel = 10.0 * self.std_weight_velocity * h;
        let std = [pos, pos, 1e-2, pos, vel, vel, 1e-5, vel];

        KalmanState {
            mean,
            covariance: diagonal_squared(std),
        }
    }

    /// Advance one frame.
    pub fn predict(&self, state: &KalmanState) -> KalmanState {
        let h = state.mean[3];
        let pos = self.std_weight_position * h;
        let vel = self.std_weight_velocity * h;
        let motion_cov = diagonal_squared([pos, pos, 1e-2, pos, vel, vel, 1e-5, vel]);

        KalmanState {
            mean: self.motion_mat * state.mean,
            covariance: self.motion_mat * state.covariance * self.motion_mat.transpose()
                + motion_cov,
        }
    }

    /// Fold a measured XYAH box into the state. `None` if the innovation
    /// covariance is singular.
    pub fn update(&self, state: &KalmanState, xyah: [f32; 4]) -> Option<KalmanState> {
        let h = state.mean[3];
        let pos = self.std_weight_position * h;
        let innovation_cov = SMatrix::<f64, 4, 4>::from_diagonal(&SVector::from([
            pos * pos,
            pos * pos,
            1e-1 * 1e-1,
            pos * pos,
        ]));

        let projected_mean = self.update_mat * state.mean;
        let projected_cov =
            self.update_mat * state.covariance * self.update_mat.transpose() + innovation_cov;

        let measurement = Measurement::from_iterator(xyah.iter().map(|v| f64::from(*v)));
        let innovation = measurement - projected_mean;

        let s_inv = projected_cov.try_inverse()?;
        let kalman_gain = state.covariance * self.update_mat.transpose() * s_inv;

        Some(KalmanState {
            mean: state.mean + kalman_gain * innovation,
            covariance: state.covariance - kalman_gain * projected_cov * kalman_gain.transpose(),
        })
    }
}

impl KalmanState {
    /// Current XYAH box estimate.
    pub fn xyah(&self) -> [f32; 4] {
        [
            self.mean[0] as f32,
            self.mean[1] as f32,
            self.mean[2] as f32,
            self.mean[3] as f32,
        ]
    }
}

fn diagonal_squared(std: [f64; 8]) -> StateCovariance {
    StateCovariance::from_diagonal(&StateVector::from_iterator(std.iter().map(|s| s * s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initiate() {
        let kf = KalmanFilter::new();
        let state = kf.initiate([100.0, 200.0, 0.5, 50.0]);
        assert_eq!(state.mean[0], 100.0);
        assert_eq!(state.mean[4], 0.0);
    }

    #[test]
    fn test_learns_constant_velocity() {
        let kf = KalmanFilter::new();
        let mut state = kf.initiate([10.0, 10.0, 1.0, 20.0]);
        for step in 1..=10 {
            state = kf.predict(&state);
            let x = 10.0 + 4.0 * step as f32;
            state = kf.update(&state, [x, 10.0, 1.0, 20.0]).unwrap();
        }

        let predicted = kf.predict(&state).xyah();
        assert!((predicted[0] - 54.0).abs() < 3.0, "predicted {predicted:?}");
        assert!((predicted[1] - 10.0).abs() < 0.5);
    }
}
