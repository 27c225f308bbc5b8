//! Wigner 3-j symbols and the rigid-rotor dipole matrix element.
//!
//! Integer-argument Racah sum evaluated in log-factorial space, which stays
//! well-conditioned across the full rotational range of the coupling tables.

/// Computes the Wigner 3-j symbol for integer quantum numbers.
///
/// Selection-rule violations return exactly zero.
pub fn wigner_3j(j1: i32, j2: i32, j3: i32, m1: i32, m2: i32, m3: i32) -> f64 {
    if j1 < 0 || j2 < 0 || j3 < 0 {
        return 0.0;
    }
    if m1 + m2 + m3 != 0 {
        return 0.0;
    }
    if m1.abs() > j1 || m2.abs() > j2 || m3.abs() > j3 {
        return 0.0;
    }
    if j3 < (j1 - j2).abs() || j3 > j1 + j2 {
        return 0.0;
    }

    let t_min = 0.max(j2 - j3 - m1).max(j1 - j3 + m2);
    let t_max = (j1 + j2 - j3).min(j1 - m1).min(j2 + m2);
    if t_min > t_max {
        return 0.0;
    }

    let mut log_factorial = LogFactorial::new();
    let prefactor_log = 0.5
        * (log_factorial.value((j1 + j2 - j3) as usize)
            + log_factorial.value((j1 - j2 + j3) as usize)
            + log_factorial.value((-j1 + j2 + j3) as usize)
            - log_factorial.value((j1 + j2 + j3 + 1) as usize)
            + log_factorial.value((j1 + m1) as usize)
            + log_factorial.value((j1 - m1) as usize)
            + log_factorial.value((j2 + m2) as usize)
            + log_factorial.value((j2 - m2) as usize)
            + log_factorial.value((j3 + m3) as usize)
            + log_factorial.value((j3 - m3) as usize));

    let mut sum = 0.0;
    for t in t_min..=t_max {
        let denominator_log = log_factorial.value(t as usize)
            + log_factorial.value((j3 - j2 + t + m1) as usize)
            + log_factorial.value((j3 - j1 + t - m2) as usize)
            + log_factorial.value((j1 + j2 - j3 - t) as usize)
            + log_factorial.value((j1 - t - m1) as usize)
            + log_factorial.value((j2 - t + m2) as usize);
        let term = (prefactor_log - denominator_log).exp();
        sum += if t % 2 == 0 { term } else { -term };
    }

    if (j1 - j2 - m3).rem_euclid(2) == 0 {
        sum
    } else {
        -sum
    }
}

/// Rigid-rotor dipole matrix element, equation 3 of
/// doi:10.1016/j.jqsrt.2004.11.011:
/// `(-1)^(Jf + l2f + 1) * sqrt(2 Jf + 1) * 3j(Ji, 1, Jf; l2i, l2f - l2i, -l2f)`.
pub fn rigid_rotor_dipole_matrix_element(
    j_initial: i32,
    j_final: i32,
    l2_initial: i32,
    l2_final: i32,
) -> f64 {
    let phase = if (j_final + l2_final + 1).rem_euclid(2) == 0 {
        1.0
    } else {
        -1.0
    };
    phase
        * ((2 * j_final + 1) as f64).sqrt()
        * wigner_3j(
            j_initial,
            1,
            j_final,
            l2_initial,
            l2_final - l2_initial,
            -l2_final,
        )
}

struct LogFactorial {
    values: Vec<f64>,
}

impl LogFactorial {
    fn new() -> Self {
        Self { values: vec![0.0] }
    }

    /// ln(n!), extending the cache on demand.
    fn value(&mut self, n: usize) -> f64 {
        while self.values.len() <= n {
            let next = self.values.len();
            let entry = self.values[next - 1] + (next as f64).ln();
            self.values.push(entry);
        }
        self.values[n]
    }
}
