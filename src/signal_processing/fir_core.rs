use super::Kernel;

/// Core FIR convolver shared by the bandpass and Hilbert stages
///
/// Holds the tap weights and a delay line. Every frame is filtered from a
/// cold (all-zero) delay line, which is equivalent to treating samples
/// before the start of the frame as zero.
///
/// Output sample `i` is `sum_k taps[k] * x[i - (n-1-k)]`, so the last tap
/// weights the newest sample.
pub struct FirFilterCore {
    taps: Vec<f64>,
    delay_line: Vec<f64>,
    pos: usize,
}

impl FirFilterCore {
    /// Create a new FIR filter core with the given tap coefficients
    pub fn new(taps: Vec<f64>) -> Self {
        Self {
            delay_line: vec![0.0; taps.len()],
            taps,
            pos: 0,
        }
    }

    pub fn from_kernel(kernel: &Kernel) -> Self {
        Self::new(kernel.taps().to_vec())
    }

    /// Clear the delay line
    pub fn reset(&mut self) {
        self.delay_line.fill(0.0);
        self.pos = 0;
    }

    /// Push one sample and return the filter output
    pub fn process(&mut self, sample: f64) -> f64 {
        let n = self.taps.len();
        if n == 0 {
            return 0.0;
        }
        self.delay_line[self.pos] = sample;

        let mut output = 0.0f64;

        // Walk the ring buffer newest-to-oldest in two contiguous reverse
        // ranges; the newest sample pairs with the last tap.
        let mut tap_i = n;
        for delay_idx in (0..=self.pos).rev() {
            tap_i -= 1;
            output += self.taps[tap_i] * self.delay_line[delay_idx];
        }
        for delay_idx in ((self.pos + 1)..n).rev() {
            tap_i -= 1;
            output += self.taps[tap_i] * self.delay_line[delay_idx];
        }
        debug_assert_eq!(tap_i, 0);

        self.pos += 1;
        if self.pos == n {
            self.pos = 0;
        }
        output
    }

    /// Filter a whole frame from a cold state
    pub fn filter_frame(&mut self, frame: &[f64]) -> Vec<f64> {
        self.reset();
        frame.iter().map(|&sample| self.process(sample)).collect()
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }
}

/// Zero-padded causal convolution of a frame with a kernel
///
/// Output has the same length as `frame`.
pub fn convolve_causal(kernel: &Kernel, frame: &[f64]) -> Vec<f64> {
    FirFilterCore::from_kernel(kernel).filter_frame(frame)
}
