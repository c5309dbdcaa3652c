/// Boundary traits for the audiotags workspace
///
/// Consumer of extracted picture bytes.
///
/// The artwork boundary hands the raw front-cover payload to an `ImageSink`
/// exactly once per extraction. The sink is responsible for any copying it
/// needs beyond the call; the buffer is not retained by the extractor.
///
/// When a file has no front cover, the sink is never invoked.
pub trait ImageSink {
    /// Receive the raw bytes of an extracted picture.
    fn put_image(&mut self, data: &[u8]);
}

/// Any closure over a byte slice is a valid sink.
impl<F: FnMut(&[u8])> ImageSink for F {
    fn put_image(&mut self, data: &[u8]) {
        self(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let mut received = Vec::new();
        {
            let mut sink = |data: &[u8]| received.extend_from_slice(data);
            sink.put_image(&[1, 2, 3]);
        }
        assert_eq!(received, vec![1, 2, 3]);
    }
}
