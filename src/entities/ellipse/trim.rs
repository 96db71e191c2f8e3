//! Trimming an arc at intersection points

use super::Ellipse;
use crate::math::angle::{angle_difference, is_angle_between, is_same_direction, remainder};
use crate::math::{TOLERANCE, TOLERANCE_ANGLE};
use crate::types::Vector2;
use std::f64::consts::TAU;

/// Which end of an arc an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Start,
    End,
}

impl Ellipse {
    /// The arc end nearer to `trim_coord`, measured along the traversal
    /// direction
    pub fn trim_point(&self, trim_coord: Vector2) -> Ending {
        let ang_m = self.ellipse_angle(trim_coord);
        let reversed = self.data.reversed;
        if angle_difference(ang_m, self.data.angle1, reversed) > angle_difference(self.data.angle2, ang_m, reversed) {
            Ending::Start
        } else {
            Ending::End
        }
    }

    /// Pick the candidate that becomes the new trim end and update the arc
    /// bounds accordingly.
    ///
    /// `trim_coord` marks the part of the curve to keep. A whole ellipse
    /// becomes the arc between the two candidates around `trim_coord`; an
    /// arc has one boundary moved to a candidate. Returns `None` without
    /// candidates and the only candidate as is.
    pub fn prepare_trim(&mut self, trim_coord: Vector2, candidates: &[Vector2]) -> Option<Vector2> {
        match candidates {
            [] => return None,
            [only] => return Some(*only),
            _ => {}
        }
        let n = candidates.len();
        let am = self.ellipse_angle(trim_coord);
        let gap = |a: f64| remainder(a - am, TAU).abs();

        let mut ias: Vec<f64> = candidates.iter().map(|p| self.ellipse_angle(*p)).collect();
        let (mut ia, mut is) = (ias[0], candidates[0]);
        for (a, p) in ias.iter().zip(candidates).skip(1) {
            if gap(*a) < gap(ia) {
                ia = *a;
                is = *p;
            }
        }

        // neighbor of the nearest candidate on the side of the hint
        ias.sort_by(f64::total_cmp);
        let mut ia2 = ia;
        if let Some(ii) = ias.iter().position(|a| is_same_direction(ia, *a, TOLERANCE)) {
            let prev = ias[(ii + n - 1) % n];
            ia2 = if is_angle_between(am, prev, ia, false) {
                prev
            } else {
                ias[(ii + 1) % n]
            };
        }
        let mut is2 = candidates
            .iter()
            .copied()
            .find(|p| is_same_direction(ia2, self.ellipse_angle(*p), TOLERANCE))
            .unwrap_or(is);

        let reversed = self.data.reversed;
        if is_same_direction(self.data.angle1, self.data.angle2, TOLERANCE_ANGLE) || is_same_direction(ia2, ia, TOLERANCE) {
            if !is_angle_between(am, ia, ia2, reversed) {
                std::mem::swap(&mut ia, &mut ia2);
                std::mem::swap(&mut is, &mut is2);
            }
            self.data.angle1 = ia;
            self.data.angle2 = ia2;
            if gap(self.data.angle2) < gap(self.data.angle1) {
                std::mem::swap(&mut is, &mut is2);
            }
        } else {
            let dia = gap(ia);
            let dia2 = gap(ia2);
            let ai_min = dia.min(dia2);
            let mut da1 = gap(self.data.angle1);
            let mut da2 = gap(self.data.angle2);
            if da1.min(da2) < ai_min {
                // the hint is nearer an existing end: shrink towards the candidates
                let irev = is_angle_between(am, ia2, ia, reversed);
                if is_angle_between(ia, self.data.angle1, self.data.angle2, reversed)
                    && is_angle_between(ia2, self.data.angle1, self.data.angle2, reversed)
                {
                    if irev {
                        self.data.angle1 = ia2;
                        self.data.angle2 = ia;
                    } else {
                        self.data.angle1 = ia;
                        self.data.angle2 = ia2;
                    }
                    da1 = gap(self.data.angle1);
                    da2 = gap(self.data.angle2);
                }
                if (da1 < da2 && is_angle_between(ia2, ia, self.data.angle1, reversed))
                    || (da1 > da2 && is_angle_between(ia2, self.data.angle2, ia, reversed))
                {
                    std::mem::swap(&mut is, &mut is2);
                }
            } else {
                if dia > dia2 {
                    std::mem::swap(&mut is, &mut is2);
                    std::mem::swap(&mut ia, &mut ia2);
                }
                if is_angle_between(ia, self.data.angle1, self.data.angle2, reversed) {
                    if (ia - self.data.angle1).abs() > TOLERANCE_ANGLE
                        && is_angle_between(am, self.data.angle1, ia, reversed)
                    {
                        self.data.angle2 = ia;
                    } else {
                        self.data.angle1 = ia;
                    }
                }
            }
        }
        self.calculate_borders();
        Some(is)
    }
}
