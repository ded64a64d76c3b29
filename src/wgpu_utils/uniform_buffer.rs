use wgpu::util::DeviceExt;

/// A uniform buffer holding exactly one `T`.
///
/// Keeps a CPU copy of the last upload so unchanged values never hit the
/// queue.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    shadow: T,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &str, initial: T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            shadow: initial,
        }
    }

    /// Uploads `content`. Returns false if it matched the previous upload.
    pub fn write(&mut self, queue: &wgpu::Queue, content: T) -> bool {
        if !differs(&self.shadow, &content) {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&content));
        self.shadow = content;
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

fn differs<T: bytemuck::Pod>(a: &T, b: &T) -> bool {
    bytemuck::bytes_of(a) != bytemuck::bytes_of(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differs_is_bytewise() {
        let a = [1.0f32, 2.0, 3.0, 4.0];
        assert!(!differs(&a, &a));
        assert!(differs(&a, &[1.0, 2.0, 3.0, 4.5]));
        // -0.0 == 0.0 as floats, but not as bytes
        assert!(differs(&[0.0f32], &[-0.0f32]));
    }
}
