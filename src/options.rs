/// Flags asking the backend for extra processing of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub auto_categorize: bool,
    pub skip_duplicates: bool,
    pub extract_dates: bool,
    pub detect_merchants: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            auto_categorize: true,
            skip_duplicates: true,
            extract_dates: true,
            detect_merchants: true,
        }
    }
}

/// Identifies one flag; the wire name is the multipart field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingOption {
    AutoCategorize,
    SkipDuplicates,
    ExtractDates,
    DetectMerchants,
}

impl ProcessingOption {
    pub const ALL: [ProcessingOption; 4] = [
        ProcessingOption::AutoCategorize,
        ProcessingOption::SkipDuplicates,
        ProcessingOption::ExtractDates,
        ProcessingOption::DetectMerchants,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            ProcessingOption::AutoCategorize => "autoCategorize",
            ProcessingOption::SkipDuplicates => "skipDuplicates",
            ProcessingOption::ExtractDates => "extractDates",
            ProcessingOption::DetectMerchants => "detectMerchants",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessingOption::AutoCategorize => "Auto-categorize transactions",
            ProcessingOption::SkipDuplicates => "Skip duplicate transactions",
            ProcessingOption::ExtractDates => "Extract dates",
            ProcessingOption::DetectMerchants => "Detect merchants",
        }
    }
}

impl ProcessingOptions {
    pub fn get(&self, option: ProcessingOption) -> bool {
        match option {
            ProcessingOption::AutoCategorize => self.auto_categorize,
            ProcessingOption::SkipDuplicates => self.skip_duplicates,
            ProcessingOption::ExtractDates => self.extract_dates,
            ProcessingOption::DetectMerchants => self.detect_merchants,
        }
    }

    pub fn set(&mut self, option: ProcessingOption, enabled: bool) {
        let slot = match option {
            ProcessingOption::AutoCategorize => &mut self.auto_categorize,
            ProcessingOption::SkipDuplicates => &mut self.skip_duplicates,
            ProcessingOption::ExtractDates => &mut self.extract_dates,
            ProcessingOption::DetectMerchants => &mut self.detect_merchants,
        };
        *slot = enabled;
    }

    /// Multipart fields as `(name, "true" | "false")` pairs.
    pub fn form_fields(&self) -> Vec<(&'static str, &'static str)> {
        ProcessingOption::ALL
            .iter()
            .map(|&opt| (opt.field_name(), if self.get(opt) { "true" } else { "false" }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_reflect_toggle_state() {
        let mut options = ProcessingOptions::default();
        options.set(ProcessingOption::SkipDuplicates, false);
        assert_eq!(
            options.form_fields(),
            vec![
                ("autoCategorize", "true"),
                ("skipDuplicates", "false"),
                ("extractDates", "true"),
                ("detectMerchants", "true"),
            ]
        );
    }
}
