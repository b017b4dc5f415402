//! Initial pose snapshot taken before any row is written.

use log::debug;

use crate::config::TransformChannel;
use crate::error::HostResult;
use crate::host::SceneHost;

/// The object's location and Euler rotation as they were before the import.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InitialPose {
    pub location: [f32; 3],
    pub rotation: [f32; 3],
}

impl InitialPose {
    pub fn capture<H: SceneHost + ?Sized>(host: &H) -> HostResult<Self> {
        Ok(Self {
            location: host.transform(TransformChannel::Location)?,
            rotation: host.transform(TransformChannel::Rotation)?,
        })
    }

    pub fn channel(&self, channel: TransformChannel) -> [f32; 3] {
        match channel {
            TransformChannel::Location => self.location,
            TransformChannel::Rotation => self.rotation,
        }
    }

    /// Key the untouched pose of `channel` at `frame` so the range before the first
    /// data row holds the original pose instead of the first imported value.
    pub fn anchor<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        channel: TransformChannel,
        frame: f64,
    ) -> HostResult<()> {
        debug!(
            "anchoring {} at frame {frame} to {:?}",
            channel.data_path(),
            self.channel(channel)
        );
        host.insert_keyframe(&channel.data_path(), None, frame)
    }
}
