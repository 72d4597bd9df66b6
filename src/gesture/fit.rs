//! 最小二乘直线拟合
//! Closed-form least-squares line fit `dependent = slope * independent + intercept`

/// 自变量方差低于此值时视为退化 (所有点横坐标相同)
pub const DEGENERATE_VARIANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// 拟合 `dependent ≈ slope * independent + intercept`
    ///
    /// 自变量零方差时 (竖直线) 返回 `slope = +∞`, `intercept` 取因变量均值,
    /// 不做除零运算. 空输入同样视为退化.
    pub fn fit(independent: &[i32], dependent: &[i32]) -> Self {
        let n = independent.len().min(dependent.len());
        if n == 0 {
            return Self::degenerate(0.0);
        }

        let nf = n as f64;
        let mean_x = independent[..n].iter().map(|&v| v as f64).sum::<f64>() / nf;
        let mean_y = dependent[..n].iter().map(|&v| v as f64).sum::<f64>() / nf;

        let (sxx, sxy) = independent[..n]
            .iter()
            .zip(&dependent[..n])
            .fold((0.0, 0.0), |(sxx, sxy), (&x, &y)| {
                let dx = x as f64 - mean_x;
                let dy = y as f64 - mean_y;
                (sxx + dx * dx, sxy + dx * dy)
            });

        if sxx < DEGENERATE_VARIANCE {
            return Self::degenerate(mean_y);
        }

        let slope = sxy / sxx;
        Self {
            slope,
            intercept: mean_y - slope * mean_x,
        }
    }

    fn degenerate(mean_dependent: f64) -> Self {
        Self {
            slope: f64::INFINITY,
            intercept: mean_dependent,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !self.slope.is_finite()
    }

    /// 斜率是否落在开区间 (-limit, limit) 内
    pub fn slope_within(&self, limit: f64) -> bool {
        self.slope > -limit && self.slope < limit
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_exact_line() {
        let xs = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let ys: Vec<i32> = xs.iter().map(|x| 3 * x + 7).collect();
        let fit = LinearFit::fit(&xs, &ys);
        assert!((fit.slope - 3.0).abs() < EPS);
        assert!((fit.intercept - 7.0).abs() < EPS);
        assert!((fit.eval(10.0) - 37.0).abs() < EPS);
    }

    #[test]
    fn test_horizontal_line_has_zero_slope() {
        let xs = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90];
        let ys = [50; 10];
        let fit = LinearFit::fit(&xs, &ys);
        assert!(fit.slope.abs() < EPS);
        assert!((fit.intercept - 50.0).abs() < EPS);
        assert!(fit.slope_within(0.5));
    }

    #[test]
    fn test_zero_variance_is_degenerate() {
        let xs = [20; 10];
        let ys = [0, 8, 16, 24, 32, 40, 48, 56, 64, 72];
        let fit = LinearFit::fit(&xs, &ys);
        assert!(fit.is_degenerate());
        assert!(!fit.slope_within(0.5));
        assert!((fit.intercept - 36.0).abs() < EPS);
    }

    #[test]
    fn test_noisy_fit() {
        let xs = [0, 1, 2, 3];
        let ys = [1, 3, 2, 4];
        // 手算: mean_x=1.5, mean_y=2.5, sxy=4, sxx=5
        let fit = LinearFit::fit(&xs, &ys);
        assert!((fit.slope - 0.8).abs() < EPS);
        assert!((fit.intercept - 1.3).abs() < EPS);
    }

    #[test]
    fn test_slope_band_is_exclusive() {
        let fit = LinearFit {
            slope: 0.5,
            intercept: 0.0,
        };
        assert!(!fit.slope_within(0.5));
        let fit = LinearFit {
            slope: -0.49,
            intercept: 0.0,
        };
        assert!(fit.slope_within(0.5));
    }

    #[test]
    fn test_empty_input() {
        assert!(LinearFit::fit(&[], &[]).is_degenerate());
    }
}
