//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::cell::RefCell;

use crate::Uuid;
use inner::GlobalGenInner;

thread_local! {
    static DEFAULT_GENERATOR: RefCell<GlobalGenInner> = RefCell::new(GlobalGenInner::default());
}

/// Generates a COMB UUID object from the current time.
///
/// This function employs a thread-local generator, so calls from different threads never contend
/// for a lock. On Unix, this function resets the generator when the process ID changes (i.e.,
/// upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = combuuid::combuuid();
/// println!("{}", uuid); // e.g., "6c1b79f3-2b4d-4c1e-9a3f-1d2e3f405162"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = combuuid::combuuid().to_string();
/// ```
pub fn combuuid() -> Uuid {
    DEFAULT_GENERATOR.with(|g| g.borrow_mut().get_mut().generate())
}

/// Generates a COMB UUID object from the `unix_ts_sec` passed.
///
/// # Examples
///
/// ```rust
/// let uuid = combuuid::combuuid_at(1_660_513);
/// assert!(uuid.to_string().starts_with("6c1b"));
/// ```
pub fn combuuid_at(unix_ts_sec: i64) -> Uuid {
    DEFAULT_GENERATOR.with(|g| g.borrow_mut().get_mut().generate_core(unix_ts_sec))
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{CombGenerator, RandSource};

    /// Number of bytes after which the default generator reseeds from the OS.
    const RESEED_THRESHOLD: u64 = 1024 * 64;

    /// The random number generator of the default generator.
    ///
    /// The default generator employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate
    /// the strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl RandSource for GlobalGenRng {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: CombGenerator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("combuuid: could not initialize default generator");
            tracing::debug!(pid = std::process::id(), "initialized default generator");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: CombGenerator::new(GlobalGenRng(ReseedingRng::new(
                    core,
                    RESEED_THRESHOLD,
                    OsRng,
                ))),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`CombGenerator`] instance, resetting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut CombGenerator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!(
                    old_pid = self.pid,
                    pid = std::process::id(),
                    "process id changed; resetting default generator"
                );
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
