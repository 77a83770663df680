//! Probe statistics, available with the `stats` feature.

use alloc::vec::Vec;

/// Number of entries at each distance from their ideal slot.
///
/// Bin `d` counts entries stored `d` slots after the slot their key hashes
/// to, so bin 0 holds the entries that needed no probing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeHistogram {
    bins: Vec<usize>,
}

impl ProbeHistogram {
    pub(crate) fn from_displacements(displacements: impl Iterator<Item = usize>) -> Self {
        let mut bins = Vec::new();
        for displacement in displacements {
            if bins.len() <= displacement {
                bins.resize(displacement + 1, 0);
            }
            bins[displacement] += 1;
        }
        Self { bins }
    }

    /// Counts per displacement, starting at zero.
    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    /// Number of entries counted.
    pub fn entries(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Largest displacement seen, or `None` for an empty table.
    pub fn max_displacement(&self) -> Option<usize> {
        self.bins.len().checked_sub(1)
    }

    /// Average number of slots inspected by a successful lookup.
    pub fn mean_probe_length(&self) -> f64 {
        let entries = self.entries();
        if entries == 0 {
            return 0.0;
        }
        let probes: usize = self
            .bins
            .iter()
            .enumerate()
            .map(|(displacement, count)| (displacement + 1) * count)
            .sum();
        probes as f64 / entries as f64
    }

    /// Prints the histogram as a horizontal bar chart.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.entries());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = (count * total_units).div_ceil(max);
            let mut bar = "█".repeat(units / 8);
            let partial = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];
            if units % 8 > 0 {
                bar.push(partial[units % 8 - 1]);
            }
            bar
        };

        for (displacement, &count) in self.bins.iter().enumerate() {
            println!("{displacement:>3} | {} ({count})", make_bar(count));
        }
    }
}

/// A snapshot of table occupancy and probe behavior.
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries.
    pub populated: usize,
    /// Number of slots.
    pub total_slots: usize,
    /// Entries accepted before the next resize.
    pub threshold: usize,
    /// `populated / total_slots`.
    pub occupancy: f64,
    /// Longest distance of any entry from its ideal slot.
    pub max_displacement: usize,
    /// Average slots inspected per successful lookup.
    pub mean_probe_length: f64,
    /// Bytes held by the slot storage.
    pub total_bytes: usize,
}

impl DebugStats {
    pub(crate) fn new(
        populated: usize,
        total_slots: usize,
        threshold: usize,
        histogram: &ProbeHistogram,
        total_bytes: usize,
    ) -> Self {
        Self {
            populated,
            total_slots,
            threshold,
            occupancy: populated as f64 / total_slots as f64,
            max_displacement: histogram.max_displacement().unwrap_or(0),
            mean_probe_length: histogram.mean_probe_length(),
            total_bytes,
        }
    }

    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probe Table Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% occupied, resize after {})",
            self.populated,
            self.total_slots,
            self.occupancy * 100.0,
            self.threshold
        );
        println!(
            "Probing: mean {:.3} slots per hit, max displacement {}",
            self.mean_probe_length, self.max_displacement
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_bins_and_means() {
        let histogram = ProbeHistogram::from_displacements([0, 0, 1, 3].into_iter());
        assert_eq!(histogram.bins(), &[2, 1, 0, 1]);
        assert_eq!(histogram.entries(), 4);
        assert_eq!(histogram.max_displacement(), Some(3));
        // (1 + 1 + 2 + 4) / 4
        assert_eq!(histogram.mean_probe_length(), 2.0);

        let empty = ProbeHistogram::from_displacements(core::iter::empty());
        assert_eq!(empty.max_displacement(), None);
        assert_eq!(empty.mean_probe_length(), 0.0);
    }
}
