use crate::Vertex;
use std::borrow::Cow;
use wgpu::{util::DeviceExt, PipelineCompilationOptions};

const FAN_SHADER: &str = include_str!("shaders/fan.wgsl");
const VS_ENTRY: &str = "main_vs";
const FS_ENTRY: &str = "main_fs";

pub struct Render {
  render_pipeline: wgpu::RenderPipeline,
  vertex_buffer: Option<wgpu::Buffer>,
  vertex_capacity: usize,
  vertex_count: u32,
}

impl Render {
  #[must_use]
  pub fn init(
    config: &wgpu::SurfaceConfiguration,
    device: &wgpu::Device,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
  ) -> Self {
    let draw_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
      label: Some("fan shader"),
      source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(FAN_SHADER)),
    });

    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
      label: Some("render"),
      bind_group_layouts: &[camera_bind_group_layout],
      push_constant_ranges: &[],
    });
    let vertex_layout = wgpu::VertexBufferLayout {
      array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
      step_mode: wgpu::VertexStepMode::Vertex,
      attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4],
    };
    let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
      label: Some("Render Pipeline"),
      layout: Some(&render_pipeline_layout),
      vertex: wgpu::VertexState {
        module: &draw_shader,
        entry_point: VS_ENTRY,
        compilation_options: PipelineCompilationOptions::default(),
        buffers: &[vertex_layout],
      },
      fragment: Some(wgpu::FragmentState {
        module: &draw_shader,
        entry_point: FS_ENTRY,
        compilation_options: PipelineCompilationOptions::default(),
        targets: &[Some(wgpu::ColorTargetState {
          format: config.view_formats[0],
          blend: Some(wgpu::BlendState::ALPHA_BLENDING),
          write_mask: wgpu::ColorWrites::ALL,
        })],
      }),
      primitive: wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        cull_mode: None,
        ..wgpu::PrimitiveState::default()
      },
      depth_stencil: None,
      multisample: wgpu::MultisampleState::default(),
      multiview: None,
      cache: None,
    });

    Render {
      render_pipeline,
      vertex_buffer: None,
      vertex_capacity: 0,
      vertex_count: 0,
    }
  }

  /// Uploads this frame's triangle list, growing the buffer when needed.
  pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
    self.vertex_count = vertices.len() as u32;
    if vertices.is_empty() {
      return;
    }
    match &self.vertex_buffer {
      Some(buffer) if vertices.len() <= self.vertex_capacity => {
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(vertices));
      }
      _ => {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
          label: Some("Vertex Buffer"),
          contents: bytemuck::cast_slice(vertices),
          usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        }));
        self.vertex_capacity = vertices.len();
      }
    }
  }

  pub fn render(
    &mut self,
    view: &wgpu::TextureView,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    camera_bind_group: &wgpu::BindGroup,
  ) {
    let color_attachments = [Some(wgpu::RenderPassColorAttachment {
      view,
      resolve_target: None,
      ops: wgpu::Operations {
        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
        store: wgpu::StoreOp::Store,
      },
    })];
    let render_pass_descriptor = wgpu::RenderPassDescriptor {
      label: None,
      color_attachments: &color_attachments,
      depth_stencil_attachment: None,
      timestamp_writes: None,
      occlusion_query_set: None,
    };
    let mut command_encoder =
      device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    {
      let mut rpass = command_encoder.begin_render_pass(&render_pass_descriptor);
      if let (Some(buffer), true) = (&self.vertex_buffer, self.vertex_count > 0) {
        rpass.set_pipeline(&self.render_pipeline);
        rpass.set_bind_group(0, camera_bind_group, &[]);
        rpass.set_vertex_buffer(0, buffer.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
      }
    }
    queue.submit(Some(command_encoder.finish()));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shader_declares_pipeline_entry_points() {
    for entry in [VS_ENTRY, FS_ENTRY] {
      assert!(
        FAN_SHADER.contains(&format!("fn {entry}(")),
        "fan.wgsl has no `{entry}`"
      );
    }
  }
}
